use garde::Validate;
use serde::{Deserialize, Serialize};

/// Validation failure of one submitted field, shown next to the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub param: String,
    pub value: String,
    pub msg: String,
}

impl FieldError {
    pub fn map_value(self, f: impl FnOnce(&str) -> String) -> Self {
        FieldError {
            value: f(&self.value),
            ..self
        }
    }
}

fn field_value(values: &serde_json::Value, param: &str) -> String {
    match values.get(param) {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Checks the payload against its declared rules.
///
/// Returns the payload untouched when valid, otherwise one [`FieldError`]
/// per violated rule, carrying the submitted value of the field.
pub fn validate_form<T>(payload: T) -> Result<T, Vec<FieldError>>
where
    T: Validate<Context = ()> + Serialize,
{
    match payload.validate() {
        Ok(()) => Ok(payload),
        Err(report) => {
            let values = serde_json::to_value(&payload).unwrap_or_default();
            Err(report
                .iter()
                .map(|(path, error)| {
                    let param = path.to_string();
                    FieldError {
                        value: field_value(&values, &param),
                        msg: error.message().to_string(),
                        param,
                    }
                })
                .collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Serialize, Validate)]
    struct Shelf {
        #[garde(length(min = 1))]
        label: String,
        #[garde(range(min = 1, max = 10))]
        capacity: u32,
    }

    #[test]
    fn test_valid_form() {
        let shelf = Shelf {
            label: "Top".into(),
            capacity: 3,
        };
        let shelf = validate_form(shelf).unwrap();
        assert_eq!(shelf.label, "Top");
    }

    #[test]
    fn test_invalid_form() {
        let shelf = Shelf {
            label: "".into(),
            capacity: 11,
        };
        let mut errors = validate_form(shelf).unwrap_err();
        errors.sort_by(|a, b| a.param.cmp(&b.param));
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].param, "capacity");
        assert_eq!(errors[0].value, "11");
        assert_eq!(errors[1].param, "label");
        assert_eq!(errors[1].value, "");
    }

    #[test]
    fn test_map_value() {
        let error = FieldError {
            param: "name".into(),
            value: "<b>".into(),
            msg: "bad".into(),
        };
        assert_eq!(error.map_value(|v| v.len().to_string()).value, "3");
    }
}
