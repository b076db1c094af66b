use kson::Kson;

///
/// Shape
///

#[derive(Debug, Kson, PartialEq)]
pub struct Shape {
    pub name: String,
}

///
/// Polygon
///

#[derive(Debug, Kson, PartialEq)]
#[kson(extends = "Shape")]
pub struct Polygon {
    pub name: String,
    pub sides: u8,
}

///
/// Square
///

#[derive(Debug, Kson, PartialEq)]
#[kson(extends = "Polygon")]
pub struct Square {
    pub name: String,
    pub sides: u8,
    pub side: f64,
}
