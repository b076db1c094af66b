//! Object-safe token stream seams.
//!
//! Generated adapters only talk to [`JsonRead`] and [`JsonWrite`]. The `struson` backed
//! [`StreamReader`] and [`StreamWriter`] are the implementations used by the registry helpers.

use crate::error::KsonError;
use std::io::{Read, Write};
use struson::{
    reader::{JsonReader, JsonStreamReader, ValueType},
    writer::{JsonStreamWriter, JsonWriter},
};

///
/// ValueKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl From<ValueType> for ValueKind {
    fn from(value: ValueType) -> Self {
        match value {
            ValueType::Null => Self::Null,
            ValueType::Boolean => Self::Bool,
            ValueType::Number => Self::Number,
            ValueType::String => Self::String,
            ValueType::Array => Self::Array,
            ValueType::Object => Self::Object,
        }
    }
}

///
/// JsonRead
///

pub trait JsonRead {
    /// Kind of the next value; must be called at a value position.
    fn peek(&mut self) -> Result<ValueKind, KsonError>;

    fn next_null(&mut self) -> Result<(), KsonError>;

    fn next_bool(&mut self) -> Result<bool, KsonError>;

    fn next_string(&mut self) -> Result<String, KsonError>;

    /// Raw number text, parsed by the caller into its target type.
    fn next_number(&mut self) -> Result<String, KsonError>;

    fn begin_object(&mut self) -> Result<(), KsonError>;

    /// Whether the current object or array has more entries.
    fn has_next(&mut self) -> Result<bool, KsonError>;

    fn next_name(&mut self) -> Result<String, KsonError>;

    fn end_object(&mut self) -> Result<(), KsonError>;

    fn begin_array(&mut self) -> Result<(), KsonError>;

    fn end_array(&mut self) -> Result<(), KsonError>;

    /// Skip the next value without interpreting it.
    fn skip_value(&mut self) -> Result<(), KsonError>;
}

///
/// JsonWrite
///

pub trait JsonWrite {
    fn null_value(&mut self) -> Result<(), KsonError>;

    fn bool_value(&mut self, value: bool) -> Result<(), KsonError>;

    fn string_value(&mut self, value: &str) -> Result<(), KsonError>;

    fn i64_value(&mut self, value: i64) -> Result<(), KsonError>;

    fn u64_value(&mut self, value: u64) -> Result<(), KsonError>;

    fn f32_value(&mut self, value: f32) -> Result<(), KsonError>;

    fn f64_value(&mut self, value: f64) -> Result<(), KsonError>;

    fn begin_object(&mut self) -> Result<(), KsonError>;

    fn name(&mut self, name: &str) -> Result<(), KsonError>;

    fn end_object(&mut self) -> Result<(), KsonError>;

    fn begin_array(&mut self) -> Result<(), KsonError>;

    fn end_array(&mut self) -> Result<(), KsonError>;
}

///
/// StreamReader
///

pub struct StreamReader<R: Read> {
    inner: JsonStreamReader<R>,
}

impl<R: Read> StreamReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            inner: JsonStreamReader::new(reader),
        }
    }

    /// Ensure nothing but whitespace follows the top-level value.
    pub fn finish(self) -> Result<(), KsonError> {
        self.inner.consume_trailing_whitespace()?;

        Ok(())
    }
}

impl<R: Read> JsonRead for StreamReader<R> {
    fn peek(&mut self) -> Result<ValueKind, KsonError> {
        Ok(self.inner.peek()?.into())
    }

    fn next_null(&mut self) -> Result<(), KsonError> {
        Ok(self.inner.next_null()?)
    }

    fn next_bool(&mut self) -> Result<bool, KsonError> {
        Ok(self.inner.next_bool()?)
    }

    fn next_string(&mut self) -> Result<String, KsonError> {
        Ok(self.inner.next_string()?)
    }

    fn next_number(&mut self) -> Result<String, KsonError> {
        Ok(self.inner.next_number_as_string()?)
    }

    fn begin_object(&mut self) -> Result<(), KsonError> {
        Ok(self.inner.begin_object()?)
    }

    fn has_next(&mut self) -> Result<bool, KsonError> {
        Ok(self.inner.has_next()?)
    }

    fn next_name(&mut self) -> Result<String, KsonError> {
        Ok(self.inner.next_name_owned()?)
    }

    fn end_object(&mut self) -> Result<(), KsonError> {
        Ok(self.inner.end_object()?)
    }

    fn begin_array(&mut self) -> Result<(), KsonError> {
        Ok(self.inner.begin_array()?)
    }

    fn end_array(&mut self) -> Result<(), KsonError> {
        Ok(self.inner.end_array()?)
    }

    fn skip_value(&mut self) -> Result<(), KsonError> {
        Ok(self.inner.skip_value()?)
    }
}

///
/// StreamWriter
///

pub struct StreamWriter<W: Write> {
    inner: JsonStreamWriter<W>,
}

impl<W: Write> StreamWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            inner: JsonStreamWriter::new(writer),
        }
    }

    /// Check the document is complete and flush the underlying writer.
    pub fn finish(self) -> Result<(), KsonError> {
        self.inner.finish_document()?;

        Ok(())
    }
}

impl<W: Write> JsonWrite for StreamWriter<W> {
    fn null_value(&mut self) -> Result<(), KsonError> {
        Ok(self.inner.null_value()?)
    }

    fn bool_value(&mut self, value: bool) -> Result<(), KsonError> {
        Ok(self.inner.bool_value(value)?)
    }

    fn string_value(&mut self, value: &str) -> Result<(), KsonError> {
        Ok(self.inner.string_value(value)?)
    }

    fn i64_value(&mut self, value: i64) -> Result<(), KsonError> {
        Ok(self.inner.number_value(value)?)
    }

    fn u64_value(&mut self, value: u64) -> Result<(), KsonError> {
        Ok(self.inner.number_value(value)?)
    }

    fn f32_value(&mut self, value: f32) -> Result<(), KsonError> {
        self.inner
            .fp_number_value(value)
            .map_err(|err| KsonError::Write(err.to_string()))
    }

    fn f64_value(&mut self, value: f64) -> Result<(), KsonError> {
        self.inner
            .fp_number_value(value)
            .map_err(|err| KsonError::Write(err.to_string()))
    }

    fn begin_object(&mut self) -> Result<(), KsonError> {
        Ok(self.inner.begin_object()?)
    }

    fn name(&mut self, name: &str) -> Result<(), KsonError> {
        Ok(self.inner.name(name)?)
    }

    fn end_object(&mut self) -> Result<(), KsonError> {
        Ok(self.inner.end_object()?)
    }

    fn begin_array(&mut self) -> Result<(), KsonError> {
        Ok(self.inner.begin_array()?)
    }

    fn end_array(&mut self) -> Result<(), KsonError> {
        Ok(self.inner.end_array()?)
    }
}
