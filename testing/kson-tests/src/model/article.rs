use kson::Kson;

///
/// Article
///
/// Missing keys fall back to [`Article::sample`].
///

#[derive(Clone, Debug, Kson, PartialEq)]
#[kson(default = "Self::sample")]
pub struct Article {
    pub title: String,
    pub title2: String,
    pub views: u64,
    pub summary: Option<String>,

    #[kson(skip)]
    pub cached_len: usize,
}

impl Article {
    #[must_use]
    pub fn sample() -> Self {
        Self {
            title: "Untitled".into(),
            title2: "Fallback subtitle".into(),
            views: 0,
            summary: Some("No summary".into()),
            cached_len: 7,
        }
    }
}

///
/// Settings
///

#[derive(Clone, Debug, Default, Kson, PartialEq)]
#[kson(default)]
pub struct Settings {
    pub theme: String,
    pub font_size: Option<u8>,
    pub beta: bool,
}

///
/// Toggle
///

#[derive(Clone, Debug, Default, Kson, PartialEq)]
#[kson(default)]
pub struct Toggle {
    pub enabled: bool,
    pub enabled_assigned: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry;

    #[test]
    fn missing_fields_take_the_provider_value() {
        let article = registry()
            .from_json::<Article>(r#"{"title":"Hello","views":3}"#)
            .unwrap()
            .unwrap();

        assert_eq!(article.title, "Hello");
        assert_eq!(article.title2, "Fallback subtitle");
        assert_eq!(article.views, 3);
        assert_eq!(article.summary.as_deref(), Some("No summary"));
    }

    #[test]
    fn null_keeps_the_default() {
        let article = registry()
            .from_json::<Article>(r#"{"title2":null,"summary":null}"#)
            .unwrap()
            .unwrap();

        assert_eq!(article.title2, "Fallback subtitle");
        assert_eq!(article.summary.as_deref(), Some("No summary"));
    }

    #[test]
    fn skipped_fields_never_reach_the_wire() {
        let kson = registry();
        let article = Article {
            cached_len: 99,
            ..Article::sample()
        };

        let json = kson.to_json(Some(&article)).unwrap();
        let back = kson.from_json::<Article>(&json).unwrap().unwrap();

        assert!(!json.contains("cached_len"));
        assert_eq!(back.cached_len, 7);
    }

    #[test]
    fn default_trait_provider() {
        let settings = registry()
            .from_json::<Settings>(r#"{"beta":true}"#)
            .unwrap()
            .unwrap();

        assert_eq!(
            settings,
            Settings {
                beta: true,
                ..Settings::default()
            }
        );
    }

    #[test]
    fn empty_object_is_the_default() {
        let settings = registry().from_json::<Settings>("{}").unwrap();

        assert_eq!(settings, Some(Settings::default()));
    }

    #[test]
    fn field_names_with_flag_suffixes_read_independently() {
        let kson = registry();

        let only_suffixed = kson
            .from_json::<Toggle>(r#"{"enabled_assigned":true}"#)
            .unwrap();
        let both = kson
            .from_json::<Toggle>(r#"{"enabled":true,"enabled_assigned":false}"#)
            .unwrap();

        assert_eq!(
            only_suffixed,
            Some(Toggle {
                enabled: false,
                enabled_assigned: true,
            })
        );
        assert_eq!(
            both,
            Some(Toggle {
                enabled: true,
                enabled_assigned: false,
            })
        );
    }
}
