/// Recognized fields of the `/submit` form.
///
/// Every field defaults to an empty string; values are taken verbatim with
/// no validation, escaping or length limit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionFields {
    /// Document title.
    pub title: String,
    /// Free-form description.
    pub desc: String,
    /// Tag string as typed by the client.
    pub tags: String,
}

impl SubmissionFields {
    /// Collects the recognized fields from decoded form pairs.
    ///
    /// The first value of a repeated field wins. Unknown names are ignored
    /// and a field that never appears stays empty.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let (mut title, mut desc, mut tags) = (None, None, None);

        for (name, value) in pairs {
            let slot = match name {
                "title" => &mut title,
                "desc" => &mut desc,
                "tags" => &mut tags,
                _ => continue,
            };
            slot.get_or_insert_with(|| value.to_owned());
        }

        Self {
            title: title.unwrap_or_default(),
            desc: desc.unwrap_or_default(),
            tags: tags.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SubmissionFields;

    #[test]
    fn absent_fields_default_to_empty_strings() {
        let fields = SubmissionFields::from_pairs([("title", "Quarterly")]);

        assert_eq!(fields.title, "Quarterly");
        assert_eq!(fields.desc, "");
        assert_eq!(fields.tags, "");
    }

    #[test]
    fn first_value_of_a_repeated_field_wins() {
        let fields = SubmissionFields::from_pairs([
            ("title", "first"),
            ("title", "second"),
            ("desc", "kept"),
            ("tags", "x"),
        ]);

        assert_eq!(
            fields,
            SubmissionFields {
                title: "first".to_owned(),
                desc: "kept".to_owned(),
                tags: "x".to_owned(),
            }
        );
    }

    #[test]
    fn unknown_fields_are_ignored_and_empty_values_kept() {
        let fields = SubmissionFields::from_pairs([("extra", "dropped"), ("tags", ""), ("tags", "late")]);

        assert_eq!(fields.tags, "");
        assert_eq!(fields.title, "");
    }
}
