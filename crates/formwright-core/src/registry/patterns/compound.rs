//! Compound fields: phone number, name, and address.
//!
//! Each stores an object keyed by sub-field name. Validation failures carry
//! per-sub-field errors in `FormError::fields`; sub-fields that passed are
//! absent from it.

use formwright_types::error::RegistryError;
use formwright_types::pattern::{CompoundFieldData, Pattern, PatternData, PatternType};
use formwright_types::prompt::{PromptComponent, PromptProps};
use formwright_types::session::{FormError, FormErrors, InputRejection};
use serde_json::{Map, Value};

use crate::prompt::PromptContext;
use crate::registry::{
    InputParser, ParseContext, PatternConfig, mismatch, parse_data, require_text, text_of,
    unsupported,
};

const PHONE_NUMBER: &str = "phoneNumber";

const GIVEN_NAME: &str = "givenName";
const MIDDLE_NAME: &str = "middleName";
const FAMILY_NAME: &str = "familyName";
const NAME_PARTS: [&str; 3] = [GIVEN_NAME, MIDDLE_NAME, FAMILY_NAME];

const STREET_ADDRESS: &str = "streetAddress";
const STREET_ADDRESS_2: &str = "streetAddress2";
const CITY: &str = "city";
const STATE: &str = "stateTerritoryOrMilitaryPost";
const ZIP_CODE: &str = "zipCode";
const ADDRESS_PARTS: [&str; 5] = [STREET_ADDRESS, STREET_ADDRESS_2, CITY, STATE, ZIP_CODE];

/// Object with every part set to the empty string.
fn blank_object(parts: &[&str]) -> Value {
    Value::Object(
        parts
            .iter()
            .map(|p| (p.to_string(), Value::String(String::new())))
            .collect(),
    )
}

/// Read the named parts of a submitted object, trimmed; missing parts are "".
fn read_parts(raw: &Value, parts: &[&str]) -> Result<Map<String, Value>, InputRejection> {
    match raw {
        Value::Null => Ok(Map::new()),
        Value::Object(obj) => Ok(parts
            .iter()
            .map(|part| {
                let text = obj.get(*part).and_then(text_of).unwrap_or_default();
                (part.to_string(), Value::String(text.trim().to_string()))
            })
            .collect()),
        _ => Err(FormError::custom("Expected an object of named fields").into()),
    }
}

fn part<'a>(parts: &'a Map<String, Value>, key: &str) -> &'a str {
    parts.get(key).and_then(Value::as_str).unwrap_or_default()
}

fn compound_data(raw: &Value, label_message: &str) -> Result<CompoundFieldData, FormErrors> {
    let data = parse_data::<CompoundFieldData>(raw)?;
    let mut errors = FormErrors::new();
    require_text(&mut errors, "label", &data.label, label_message);
    if errors.is_empty() { Ok(data) } else { Err(errors) }
}

fn compound_of<'a>(
    config: PatternType,
    pattern: &'a Pattern,
) -> Result<&'a CompoundFieldData, RegistryError> {
    match &pattern.data {
        PatternData::PhoneNumber(d) | PatternData::Name(d) | PatternData::Address(d)
            if pattern.pattern_type() == config =>
        {
            Ok(d)
        }
        _ => Err(mismatch(config, pattern)),
    }
}

fn reject(message: &str, fields: FormErrors) -> InputRejection {
    FormError::custom(message).with_fields(fields).into()
}

// ---------------------------------------------------------------------------
// Phone number
// ---------------------------------------------------------------------------

/// US phone number, stored as `{"phoneNumber": "XXX-XXX-XXXX"}`.
pub struct PhoneNumberConfig;

impl PatternConfig for PhoneNumberConfig {
    fn pattern_type(&self) -> PatternType {
        PatternType::PhoneNumber
    }

    fn display_name(&self) -> &'static str {
        "Phone number"
    }

    fn initial(&self) -> PatternData {
        PatternData::PhoneNumber(CompoundFieldData {
            label: "Phone number".to_string(),
            required: false,
        })
    }

    fn parse_config_data(&self, raw: &Value) -> Result<PatternData, FormErrors> {
        compound_data(raw, "A field label is required").map(PatternData::PhoneNumber)
    }

    fn input(&self) -> Option<&dyn InputParser> {
        Some(self)
    }

    fn create_prompt(
        &self,
        ctx: &PromptContext<'_>,
        pattern: &Pattern,
    ) -> Result<PromptComponent, RegistryError> {
        let data = compound_of(self.pattern_type(), pattern)?;
        let value = ctx
            .value(&pattern.id)
            .and_then(|v| v.get(PHONE_NUMBER))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        Ok(PromptComponent::leaf(PromptProps::PhoneNumber {
            phone_id: ctx.field_id(&pattern.id),
            label: data.label.clone(),
            required: data.required,
            value,
            error: ctx.error(&pattern.id).cloned(),
        }))
    }
}

impl InputParser for PhoneNumberConfig {
    fn initial_value(&self, _pattern: &Pattern) -> Value {
        blank_object(&[PHONE_NUMBER])
    }

    fn parse_user_input(
        &self,
        _ctx: &ParseContext<'_>,
        pattern: &Pattern,
        raw: &Value,
    ) -> Result<Value, InputRejection> {
        let Ok(data) = compound_of(self.pattern_type(), pattern) else {
            return Err(unsupported(self.pattern_type(), pattern));
        };
        let parts = match raw {
            Value::String(_) | Value::Number(_) => {
                let mut obj = Map::new();
                obj.insert(PHONE_NUMBER.to_string(), raw.clone());
                read_parts(&Value::Object(obj), &[PHONE_NUMBER])?
            }
            _ => read_parts(raw, &[PHONE_NUMBER])?,
        };
        let entered = part(&parts, PHONE_NUMBER);

        let mut fields = FormErrors::new();
        if entered.is_empty() {
            if data.required {
                fields.insert(
                    PHONE_NUMBER.to_string(),
                    FormError::required("Phone number is required"),
                );
                return Err(reject("Phone number is required", fields));
            }
            return Ok(blank_object(&[PHONE_NUMBER]));
        }

        match normalize_phone(entered) {
            Some(normalized) => {
                let mut obj = Map::new();
                obj.insert(PHONE_NUMBER.to_string(), Value::String(normalized));
                Ok(Value::Object(obj))
            }
            None => {
                fields.insert(
                    PHONE_NUMBER.to_string(),
                    FormError::custom("Phone number must be a valid 10-digit US number"),
                );
                Err(reject("Invalid phone number", fields))
            }
        }
    }
}

/// `XXX-XXX-XXXX` from any punctuation of ten digits (or eleven with a
/// leading country code 1).
fn normalize_phone(entered: &str) -> Option<String> {
    if entered
        .chars()
        .any(|c| !(c.is_ascii_digit() || " ()-.+".contains(c)))
    {
        return None;
    }
    let mut digits: String = entered.chars().filter(char::is_ascii_digit).collect();
    if digits.len() == 11 && digits.starts_with('1') {
        digits.remove(0);
    }
    if digits.len() != 10 {
        return None;
    }
    Some(format!("{}-{}-{}", &digits[..3], &digits[3..6], &digits[6..]))
}

// ---------------------------------------------------------------------------
// Name
// ---------------------------------------------------------------------------

/// Personal name split into given, middle, and family parts.
pub struct NameConfig;

impl PatternConfig for NameConfig {
    fn pattern_type(&self) -> PatternType {
        PatternType::Name
    }

    fn display_name(&self) -> &'static str {
        "Name"
    }

    fn initial(&self) -> PatternData {
        PatternData::Name(CompoundFieldData {
            label: "Name".to_string(),
            required: true,
        })
    }

    fn parse_config_data(&self, raw: &Value) -> Result<PatternData, FormErrors> {
        compound_data(raw, "A field label is required").map(PatternData::Name)
    }

    fn input(&self) -> Option<&dyn InputParser> {
        Some(self)
    }

    fn create_prompt(
        &self,
        ctx: &PromptContext<'_>,
        pattern: &Pattern,
    ) -> Result<PromptComponent, RegistryError> {
        let data = compound_of(self.pattern_type(), pattern)?;
        Ok(PromptComponent::leaf(PromptProps::Name {
            name_id: ctx.field_id(&pattern.id),
            label: data.label.clone(),
            required: data.required,
            value: ctx
                .value(&pattern.id)
                .cloned()
                .unwrap_or_else(|| blank_object(&NAME_PARTS)),
            error: ctx.error(&pattern.id).cloned(),
        }))
    }
}

impl InputParser for NameConfig {
    fn initial_value(&self, _pattern: &Pattern) -> Value {
        blank_object(&NAME_PARTS)
    }

    fn parse_user_input(
        &self,
        _ctx: &ParseContext<'_>,
        pattern: &Pattern,
        raw: &Value,
    ) -> Result<Value, InputRejection> {
        let Ok(data) = compound_of(self.pattern_type(), pattern) else {
            return Err(unsupported(self.pattern_type(), pattern));
        };
        let parts = read_parts(raw, &NAME_PARTS)?;
        let filled = NAME_PARTS.iter().any(|p| !part(&parts, p).is_empty());
        if !data.required && !filled {
            return Ok(blank_object(&NAME_PARTS));
        }

        let mut fields = FormErrors::new();
        if part(&parts, GIVEN_NAME).is_empty() {
            fields.insert(
                GIVEN_NAME.to_string(),
                FormError::required("First name is required"),
            );
        }
        if part(&parts, FAMILY_NAME).is_empty() {
            fields.insert(
                FAMILY_NAME.to_string(),
                FormError::required("Last name is required"),
            );
        }
        if fields.is_empty() {
            Ok(Value::Object(parts))
        } else {
            Err(reject("Please complete the name", fields))
        }
    }
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// US mailing address.
pub struct AddressConfig;

impl PatternConfig for AddressConfig {
    fn pattern_type(&self) -> PatternType {
        PatternType::Address
    }

    fn display_name(&self) -> &'static str {
        "Address"
    }

    fn initial(&self) -> PatternData {
        PatternData::Address(CompoundFieldData {
            label: "Mailing address".to_string(),
            required: true,
        })
    }

    fn parse_config_data(&self, raw: &Value) -> Result<PatternData, FormErrors> {
        compound_data(raw, "A field label is required").map(PatternData::Address)
    }

    fn input(&self) -> Option<&dyn InputParser> {
        Some(self)
    }

    fn create_prompt(
        &self,
        ctx: &PromptContext<'_>,
        pattern: &Pattern,
    ) -> Result<PromptComponent, RegistryError> {
        let data = compound_of(self.pattern_type(), pattern)?;
        Ok(PromptComponent::leaf(PromptProps::Address {
            address_id: ctx.field_id(&pattern.id),
            label: data.label.clone(),
            required: data.required,
            value: ctx
                .value(&pattern.id)
                .cloned()
                .unwrap_or_else(|| blank_object(&ADDRESS_PARTS)),
            error: ctx.error(&pattern.id).cloned(),
        }))
    }
}

impl InputParser for AddressConfig {
    fn initial_value(&self, _pattern: &Pattern) -> Value {
        blank_object(&ADDRESS_PARTS)
    }

    fn parse_user_input(
        &self,
        _ctx: &ParseContext<'_>,
        pattern: &Pattern,
        raw: &Value,
    ) -> Result<Value, InputRejection> {
        let Ok(data) = compound_of(self.pattern_type(), pattern) else {
            return Err(unsupported(self.pattern_type(), pattern));
        };
        let mut parts = read_parts(raw, &ADDRESS_PARTS)?;
        let filled = ADDRESS_PARTS.iter().any(|p| !part(&parts, p).is_empty());
        if !data.required && !filled {
            return Ok(blank_object(&ADDRESS_PARTS));
        }

        let mut fields = FormErrors::new();
        for (key, message) in [
            (STREET_ADDRESS, "Street address is required"),
            (CITY, "City is required"),
            (STATE, "State, territory, or military post is required"),
            (ZIP_CODE, "ZIP code is required"),
        ] {
            if part(&parts, key).is_empty() {
                fields.insert(key.to_string(), FormError::required(message));
            }
        }

        let state = part(&parts, STATE).to_string();
        if !state.is_empty() {
            if state.len() == 2 && state.chars().all(|c| c.is_ascii_alphabetic()) {
                parts.insert(STATE.to_string(), Value::String(state.to_ascii_uppercase()));
            } else {
                fields.insert(
                    STATE.to_string(),
                    FormError::custom("Use a two-letter state or territory code"),
                );
            }
        }

        let zip = part(&parts, ZIP_CODE);
        if !zip.is_empty() && !is_zip_code(zip) {
            fields.insert(
                ZIP_CODE.to_string(),
                FormError::custom("ZIP code must be 5 digits, optionally followed by -4 digits"),
            );
        }

        if fields.is_empty() {
            Ok(Value::Object(parts))
        } else {
            Err(reject("Please correct the address", fields))
        }
    }
}

fn is_zip_code(zip: &str) -> bool {
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    match zip.split_once('-') {
        None => zip.len() == 5 && all_digits(zip),
        Some((five, four)) => {
            five.len() == 5 && four.len() == 4 && all_digits(five) && all_digits(four)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::PatternRegistry;
    use formwright_types::blueprint::{Blueprint, FormSummary};
    use formwright_types::pattern::{PatternId, PatternMap};
    use formwright_types::session::FormErrorType;
    use serde_json::json;

    fn parse<P: InputParser + PatternConfig>(
        config: &P,
        required: bool,
        raw: Value,
    ) -> Result<Value, InputRejection> {
        let registry = PatternRegistry::with_defaults();
        let form = Blueprint {
            summary: FormSummary::default(),
            root: PatternId::from("root"),
            patterns: PatternMap::new(),
            outputs: vec![],
        };
        let ctx = ParseContext {
            registry: &registry,
            form: &form,
        };
        let mut data = config.initial();
        match &mut data {
            PatternData::PhoneNumber(d) | PatternData::Name(d) | PatternData::Address(d) => {
                d.required = required;
            }
            _ => unreachable!(),
        }
        let pattern = Pattern::new(PatternId::from("field"), data);
        config.parse_user_input(&ctx, &pattern, &raw)
    }

    #[test]
    fn test_phone_normalized() {
        let value = parse(&PhoneNumberConfig, true, json!({"phoneNumber": "(555) 555.0100"}))
            .unwrap();
        assert_eq!(value, json!({"phoneNumber": "555-555-0100"}));
        let value = parse(&PhoneNumberConfig, true, json!("+1 555 555 0100")).unwrap();
        assert_eq!(value["phoneNumber"], "555-555-0100");
    }

    #[test]
    fn test_phone_rejects_bad_digits() {
        let err = parse(&PhoneNumberConfig, false, json!({"phoneNumber": "555-01"})).unwrap_err();
        assert!(err.error.fields.unwrap().contains_key(PHONE_NUMBER));
        assert!(err.partial.is_none());

        assert!(parse(&PhoneNumberConfig, false, json!("555-555-010x")).is_err());
    }

    #[test]
    fn test_optional_phone_accepts_blank() {
        let value = parse(&PhoneNumberConfig, false, Value::Null).unwrap();
        assert_eq!(value, json!({"phoneNumber": ""}));
        let err = parse(&PhoneNumberConfig, true, json!({"phoneNumber": " "})).unwrap_err();
        assert_eq!(
            err.error.fields.unwrap()[PHONE_NUMBER].kind,
            FormErrorType::Required
        );
    }

    #[test]
    fn test_name_reports_only_missing_parts() {
        let err = parse(&NameConfig, true, json!({"givenName": "Ada"})).unwrap_err();
        let fields = err.error.fields.unwrap();
        assert!(fields.contains_key(FAMILY_NAME));
        assert!(!fields.contains_key(GIVEN_NAME));

        let value = parse(
            &NameConfig,
            true,
            json!({"givenName": " Ada ", "familyName": "Lovelace"}),
        )
        .unwrap();
        assert_eq!(value["givenName"], "Ada");
        assert_eq!(value["middleName"], "");
    }

    #[test]
    fn test_optional_name_required_once_started() {
        assert!(parse(&NameConfig, false, json!({})).is_ok());
        assert!(parse(&NameConfig, false, json!({"middleName": "Q"})).is_err());
    }

    #[test]
    fn test_address_validates_state_and_zip() {
        let err = parse(
            &AddressConfig,
            true,
            json!({
                "streetAddress": "1 Main St",
                "city": "Springfield",
                "stateTerritoryOrMilitaryPost": "Illinois",
                "zipCode": "6270"
            }),
        )
        .unwrap_err();
        let fields = err.error.fields.unwrap();
        assert_eq!(fields.len(), 2);
        assert!(fields.contains_key(STATE));
        assert!(fields.contains_key(ZIP_CODE));

        let value = parse(
            &AddressConfig,
            true,
            json!({
                "streetAddress": "1 Main St",
                "city": "Springfield",
                "stateTerritoryOrMilitaryPost": "il",
                "zipCode": "62701-1234"
            }),
        )
        .unwrap();
        assert_eq!(value[STATE], "IL");
        assert_eq!(value[STREET_ADDRESS_2], "");
    }

    #[test]
    fn test_zip_code_shapes() {
        assert!(is_zip_code("12345"));
        assert!(is_zip_code("12345-6789"));
        assert!(!is_zip_code("1234"));
        assert!(!is_zip_code("12345-678"));
        assert!(!is_zip_code("abcde"));
    }
}
