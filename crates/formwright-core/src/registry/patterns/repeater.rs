//! Repeater: a resizable list of rows over a fixed child template.
//!
//! Submitted value is an array of row objects keyed by child pattern id.
//! Each row cell is validated by the child's own parser; failures are keyed
//! `<repeaterId>.<row>.<childId>` and the fully parsed array is always
//! returned so invalid rows stay editable.

use formwright_types::error::RegistryError;
use formwright_types::pattern::{
    Pattern, PatternData, PatternId, PatternMap, PatternType, RepeaterData,
};
use formwright_types::prompt::{PromptComponent, PromptProps};
use formwright_types::session::{FormError, FormErrors, InputRejection};
use serde_json::{Map, Value};

use crate::prompt::PromptContext;
use crate::registry::{
    InputParser, ParseContext, PatternConfig, lookup_children, mismatch, parse_data, unsupported,
    without_child,
};
use crate::submission::{REPEATER_ADD_ROW, REPEATER_DELETE_ROW, action_string};

pub struct RepeaterConfig;

impl PatternConfig for RepeaterConfig {
    fn pattern_type(&self) -> PatternType {
        PatternType::Repeater
    }

    fn display_name(&self) -> &'static str {
        "Repeatable group"
    }

    fn initial(&self) -> PatternData {
        PatternData::Repeater(RepeaterData {
            legend: "Default Heading".to_string(),
            patterns: Vec::new(),
        })
    }

    fn parse_config_data(&self, raw: &Value) -> Result<PatternData, FormErrors> {
        parse_data::<RepeaterData>(raw).map(PatternData::Repeater)
    }

    fn input(&self) -> Option<&dyn InputParser> {
        Some(self)
    }

    fn children<'p>(&self, pattern: &Pattern, patterns: &'p PatternMap) -> Vec<&'p Pattern> {
        match &pattern.data {
            PatternData::Repeater(data) => lookup_children(pattern, &data.patterns, patterns),
            _ => Vec::new(),
        }
    }

    fn remove_child_pattern(&self, pattern: &Pattern, id: &PatternId) -> Pattern {
        without_child(pattern, id)
    }

    fn create_prompt(
        &self,
        ctx: &PromptContext<'_>,
        pattern: &Pattern,
    ) -> Result<PromptComponent, RegistryError> {
        let PatternData::Repeater(data) = &pattern.data else {
            return Err(mismatch(self.pattern_type(), pattern));
        };

        let rows: &[Value] = match ctx.value(&pattern.id) {
            Some(Value::Array(rows)) => rows,
            _ => &[],
        };
        let template = self.children(pattern, &ctx.form().patterns);

        let mut row_components = Vec::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            let row_ctx = ctx.in_row(&pattern.id, index, row);
            let cells = template
                .iter()
                .map(|child| row_ctx.render(child))
                .collect::<Result<Vec<_>, _>>()?;
            row_components.push(PromptComponent::with_children(
                PromptProps::RepeaterRow {
                    index,
                    delete_action: action_string(REPEATER_DELETE_ROW, &pattern.id),
                },
                cells,
            ));
        }

        Ok(PromptComponent::with_children(
            PromptProps::Repeater {
                id: ctx.field_id(&pattern.id),
                legend: data.legend.clone(),
                add_action: action_string(REPEATER_ADD_ROW, &pattern.id),
                row_count: rows.len(),
                error: ctx.error(&pattern.id).cloned(),
            },
            row_components,
        ))
    }
}

impl InputParser for RepeaterConfig {
    fn initial_value(&self, _pattern: &Pattern) -> Value {
        Value::Array(Vec::new())
    }

    fn parse_user_input(
        &self,
        ctx: &ParseContext<'_>,
        pattern: &Pattern,
        raw: &Value,
    ) -> Result<Value, InputRejection> {
        if !matches!(pattern.data, PatternData::Repeater(_)) {
            return Err(unsupported(self.pattern_type(), pattern));
        }
        let rows = match raw {
            Value::Null => return Ok(Value::Array(Vec::new())),
            Value::Array(rows) => rows,
            _ => return Err(FormError::custom("Expected a list of rows").into()),
        };

        let template = self.children(pattern, &ctx.form.patterns);
        let mut parsed_rows = Vec::with_capacity(rows.len());
        let mut errors = FormErrors::new();

        for (index, row) in rows.iter().enumerate() {
            let mut parsed = Map::new();
            for child in &template {
                let parser = match ctx.registry.config_for(child) {
                    Ok(config) => match config.input() {
                        Some(parser) => parser,
                        None => continue,
                    },
                    Err(e) => {
                        tracing::warn!(child = %child.id, error = %e, "skipping repeater cell");
                        continue;
                    }
                };

                let cell = row.get(child.id.as_str()).cloned().unwrap_or(Value::Null);
                let cell = wrap_scalar(cell, &parser.initial_value(child));

                match parser.parse_user_input(ctx, child, &cell) {
                    Ok(value) => {
                        parsed.insert(child.id.to_string(), value);
                    }
                    Err(rejection) => {
                        errors.insert(
                            format!("{}.{}.{}", pattern.id, index, child.id),
                            rejection.error,
                        );
                        parsed.insert(child.id.to_string(), rejection.partial.unwrap_or(cell));
                    }
                }
            }
            parsed_rows.push(Value::Object(parsed));
        }

        let value = Value::Array(parsed_rows);
        if errors.is_empty() {
            Ok(value)
        } else {
            Err(InputRejection {
                error: FormError::custom("Please fix the errors in the rows below")
                    .with_fields(errors),
                partial: Some(value),
            })
        }
    }
}

/// Adapt a scalar cell to a child whose value is a single-key object.
fn wrap_scalar(cell: Value, initial: &Value) -> Value {
    let is_scalar = matches!(cell, Value::String(_) | Value::Number(_) | Value::Bool(_));
    match initial {
        Value::Object(shape) if is_scalar && shape.len() == 1 => {
            let mut wrapped = Map::new();
            if let Some(key) = shape.keys().next() {
                wrapped.insert(key.clone(), cell);
            }
            Value::Object(wrapped)
        }
        _ => cell,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blueprint::tree::{add_pattern_to_compound_field, add_pattern_to_page};
    use crate::blueprint::create_default_blueprint;
    use crate::registry::PatternRegistry;
    use formwright_types::blueprint::{Blueprint, FormSummary};
    use formwright_types::pattern::InputData;
    use serde_json::json;

    struct Fixture {
        registry: PatternRegistry,
        form: Blueprint,
        repeater: Pattern,
        input_id: PatternId,
        phone_id: PatternId,
    }

    fn fixture() -> Fixture {
        let registry = PatternRegistry::with_defaults();
        let form = create_default_blueprint(&registry, FormSummary::default()).unwrap();
        let page_id = form.root_pattern().unwrap().data.child_ids()[0].clone();

        let repeater = registry.create_pattern(PatternType::Repeater).unwrap();
        let form = add_pattern_to_page(&form, &page_id, repeater.clone(), None).unwrap();

        let mut input = registry.create_pattern(PatternType::Input).unwrap();
        input.data = PatternData::Input(InputData {
            label: "Pet name".to_string(),
            required: true,
            ..Default::default()
        });
        let form = add_pattern_to_compound_field(
            &form,
            &repeater.id,
            input.clone(),
            PatternType::Repeater,
            None,
        )
        .unwrap();

        let phone = registry.create_pattern(PatternType::PhoneNumber).unwrap();
        let form = add_pattern_to_compound_field(
            &form,
            &repeater.id,
            phone.clone(),
            PatternType::Repeater,
            None,
        )
        .unwrap();

        let repeater = form.patterns[&repeater.id].clone();
        Fixture {
            registry,
            form,
            repeater,
            input_id: input.id,
            phone_id: phone.id,
        }
    }

    #[test]
    fn test_parse_valid_rows() {
        let f = fixture();
        let ctx = ParseContext {
            registry: &f.registry,
            form: &f.form,
        };
        let raw = json!([
            { f.input_id.as_str(): "Rex", f.phone_id.as_str(): {"phoneNumber": "555-555-0100"} },
            { f.input_id.as_str(): "Tom", f.phone_id.as_str(): {"phoneNumber": "5555550101"} },
        ]);

        let parsed = RepeaterConfig.parse_user_input(&ctx, &f.repeater, &raw).unwrap();
        let rows = parsed.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][f.input_id.as_str()], "Rex");
        assert_eq!(rows[1][f.phone_id.as_str()]["phoneNumber"], "555-555-0101");
    }

    #[test]
    fn test_scalar_cells_wrapped_for_single_key_children() {
        let f = fixture();
        let ctx = ParseContext {
            registry: &f.registry,
            form: &f.form,
        };
        let raw = json!([{ f.input_id.as_str(): "Rex", f.phone_id.as_str(): "555 555 0100" }]);

        let parsed = RepeaterConfig.parse_user_input(&ctx, &f.repeater, &raw).unwrap();
        assert_eq!(parsed[0][f.phone_id.as_str()]["phoneNumber"], "555-555-0100");
    }

    #[test]
    fn test_invalid_rows_keyed_by_row_and_partial_kept() {
        let f = fixture();
        let ctx = ParseContext {
            registry: &f.registry,
            form: &f.form,
        };
        let raw = json!([
            { f.input_id.as_str(): "Rex" },
            { f.input_id.as_str(): "" },
        ]);

        let rejection = RepeaterConfig
            .parse_user_input(&ctx, &f.repeater, &raw)
            .unwrap_err();
        let fields = rejection.error.fields.unwrap();
        let key = format!("{}.1.{}", f.repeater.id, f.input_id);
        assert!(fields.contains_key(&key));
        assert!(!fields.contains_key(&format!("{}.0.{}", f.repeater.id, f.input_id)));

        let partial = rejection.partial.unwrap();
        assert_eq!(partial.as_array().unwrap().len(), 2);
        assert_eq!(partial[0][f.input_id.as_str()], "Rex");
    }

    #[test]
    fn test_null_input_is_empty_list() {
        let f = fixture();
        let ctx = ParseContext {
            registry: &f.registry,
            form: &f.form,
        };
        let parsed = RepeaterConfig
            .parse_user_input(&ctx, &f.repeater, &Value::Null)
            .unwrap();
        assert_eq!(parsed, json!([]));
    }

    #[test]
    fn test_wrap_scalar_leaves_multi_key_shapes_alone() {
        let shape = json!({"givenName": "", "familyName": ""});
        assert_eq!(wrap_scalar(json!("Ada"), &shape), json!("Ada"));
        assert_eq!(wrap_scalar(json!("x"), &json!("")), json!("x"));
        assert_eq!(
            wrap_scalar(json!("5555550100"), &json!({"phoneNumber": ""})),
            json!({"phoneNumber": "5555550100"})
        );
    }
}
