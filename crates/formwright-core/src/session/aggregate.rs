//! Reconciling submitted input with the pattern tree.
//!
//! Aggregation walks depth-first from a starting pattern. A pattern with an
//! input parser validates its own slice of the decoded submission; any other
//! pattern recurses into its children. Valid values are stored and their
//! errors cleared. Invalid input records an error and keeps the previous
//! value, except where the parser returns a partial value (repeaters), which
//! is stored so the rows stay editable. Row errors are also hoisted to flat
//! `<repeaterId>.<row>.<childId>` keys for per-field display.

use formwright_types::error::SessionError;
use formwright_types::pattern::{Pattern, PatternId};
use formwright_types::session::{FlatValues, FormSession, FormSessionData};
use serde_json::Value;

use super::wire::decode_submission;
use crate::registry::ParseContext;
use crate::registry::PatternRegistry;

fn clear_errors(result: &mut FormSessionData, id: &PatternId) {
    let prefix = format!("{id}.");
    result
        .errors
        .retain(|key, _| key != id.as_str() && !key.starts_with(&prefix));
}

/// Validate `pattern` (or its descendants) against a decoded submission,
/// accumulating into `result`.
pub fn aggregate_pattern_session_values(
    ctx: &ParseContext<'_>,
    pattern: &Pattern,
    submitted: &Value,
    result: &mut FormSessionData,
) -> Result<(), SessionError> {
    let config = ctx.registry.config_for(pattern)?;

    let Some(parser) = config.input() else {
        for child in config.children(pattern, &ctx.form.patterns) {
            aggregate_pattern_session_values(ctx, child, submitted, result)?;
        }
        return Ok(());
    };

    let raw = submitted.get(pattern.id.as_str()).unwrap_or(&Value::Null);
    clear_errors(result, &pattern.id);
    match parser.parse_user_input(ctx, pattern, raw) {
        Ok(value) => {
            result.values.insert(pattern.id.to_string(), value);
        }
        Err(rejection) => {
            tracing::debug!(pattern_id = %pattern.id, "submitted value rejected");
            if let Some(partial) = rejection.partial {
                result.values.insert(pattern.id.to_string(), partial);
                if let Some(fields) = &rejection.error.fields {
                    for (key, error) in fields {
                        result.errors.insert(key.clone(), error.clone());
                    }
                }
            }
            result.errors.insert(pattern.id.to_string(), rejection.error);
        }
    }
    Ok(())
}

/// Decode flat submitted fields and aggregate them from `pattern_id`,
/// returning the updated session.
pub fn apply_submission(
    registry: &PatternRegistry,
    session: &FormSession,
    pattern_id: &PatternId,
    flat: &FlatValues,
) -> Result<FormSession, SessionError> {
    let form = &session.form;
    let pattern = form
        .get(pattern_id.as_str())
        .ok_or_else(|| SessionError::PatternNotFound(pattern_id.clone()))?;
    let submitted = decode_submission(form, flat);
    let ctx = ParseContext { registry, form };

    let mut data = session.data.clone();
    aggregate_pattern_session_values(&ctx, pattern, &submitted, &mut data)?;
    tracing::debug!(
        pattern_id = %pattern_id,
        values = data.values.len(),
        errors = data.errors.len(),
        "applied submission"
    );
    Ok(FormSession {
        data,
        ..session.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blueprint::BlueprintBuilder;
    use crate::blueprint::walk::input_patterns;
    use formwright_types::blueprint::FormSummary;
    use formwright_types::pattern::PatternType;
    use formwright_types::session::FormErrorType;
    use serde_json::json;

    struct Fixture {
        registry: PatternRegistry,
        session: FormSession,
        input: PatternId,
        optional: PatternId,
        address: PatternId,
        repeater: PatternId,
        pet: PatternId,
    }

    fn fixture() -> Fixture {
        let registry = PatternRegistry::with_defaults();
        let mut builder = BlueprintBuilder::create(&registry, FormSummary::default()).unwrap();
        let page = builder.first_page_id().unwrap();
        let input = builder
            .add_pattern_to_page(&page, PatternType::Input, None)
            .unwrap();
        let fieldset = builder
            .add_pattern_to_page(&page, PatternType::Fieldset, None)
            .unwrap();
        let optional = builder
            .add_pattern_to_compound_field(&fieldset.id, PatternType::Input, PatternType::Fieldset, None)
            .unwrap();
        builder
            .update_pattern(&optional.id, &json!({"label": "Nickname", "required": false}))
            .unwrap();
        let address = builder
            .add_pattern_to_page(&page, PatternType::Address, None)
            .unwrap();
        let repeater = builder
            .add_pattern_to_page(&page, PatternType::Repeater, None)
            .unwrap();
        let pet = builder
            .add_pattern_to_compound_field(&repeater.id, PatternType::Input, PatternType::Repeater, None)
            .unwrap();
        let session = FormSession::new(builder.into_form());
        Fixture {
            registry,
            session,
            input: input.id,
            optional: optional.id,
            address: address.id,
            repeater: repeater.id,
            pet: pet.id,
        }
    }

    fn submit(f: &Fixture, session: &FormSession, pairs: &[(String, &str)]) -> FormSession {
        let flat: FlatValues = pairs
            .iter()
            .map(|(k, v)| (k.clone(), v.to_string()))
            .collect();
        apply_submission(&f.registry, session, &session.form.root, &flat).unwrap()
    }

    #[test]
    fn test_valid_values_stored_from_nested_containers() {
        let f = fixture();
        let session = submit(
            &f,
            &f.session,
            &[
                (f.input.to_string(), "Ada"),
                (f.optional.to_string(), "Countess"),
            ],
        );
        assert_eq!(session.data.values[f.input.as_str()], "Ada");
        assert_eq!(session.data.values[f.optional.as_str()], "Countess");
        assert!(!session.data.errors.contains_key(f.input.as_str()));
    }

    #[test]
    fn test_invalid_leaf_keeps_previous_value() {
        let f = fixture();
        let session = submit(&f, &f.session, &[(f.input.to_string(), "Ada")]);
        let session = submit(&f, &session, &[(f.input.to_string(), "")]);

        assert_eq!(session.data.values[f.input.as_str()], "Ada");
        assert_eq!(
            session.data.errors[f.input.as_str()].kind,
            FormErrorType::Required
        );

        // A later valid submission clears the error.
        let session = submit(&f, &session, &[(f.input.to_string(), "Grace")]);
        assert!(!session.data.errors.contains_key(f.input.as_str()));
        assert_eq!(session.data.values[f.input.as_str()], "Grace");
    }

    #[test]
    fn test_compound_partial_failure_reports_only_bad_parts() {
        let f = fixture();
        let id = f.address.as_str();
        let session = submit(
            &f,
            &f.session,
            &[
                (format!("{id}.streetAddress"), "1 Main St"),
                (format!("{id}.city"), "Springfield"),
                (format!("{id}.stateTerritoryOrMilitaryPost"), "IL"),
                (format!("{id}.zipCode"), "nope"),
            ],
        );
        let error = &session.data.errors[id];
        let fields = error.fields.as_ref().unwrap();
        assert_eq!(fields.len(), 1);
        assert!(fields.contains_key("zipCode"));
        assert!(!session.data.values.contains_key(id));
    }

    #[test]
    fn test_repeater_keeps_partial_rows_and_hoists_errors() {
        let f = fixture();
        let rid = f.repeater.as_str();
        let pet = f.pet.as_str();
        let session = submit(
            &f,
            &f.session,
            &[
                (format!("{rid}.0.{pet}"), "Rex"),
                (format!("{rid}.1.{pet}"), ""),
            ],
        );

        let rows = session.data.values[rid].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][pet], "Rex");
        assert!(session.data.errors.contains_key(rid));
        assert!(session.data.errors.contains_key(&format!("{rid}.1.{pet}")));

        // Fixing the row clears both the summary and the hoisted error.
        let session = submit(
            &f,
            &session,
            &[
                (format!("{rid}.0.{pet}"), "Rex"),
                (format!("{rid}.1.{pet}"), "Tom"),
            ],
        );
        assert!(!session.data.errors.contains_key(rid));
        assert!(!session.data.errors.contains_key(&format!("{rid}.1.{pet}")));
    }

    #[test]
    fn test_no_validator_bearing_pattern_dropped() {
        let f = fixture();
        let session = submit(&f, &f.session, &[(f.input.to_string(), "")]);
        for pattern in input_patterns(&f.registry, &session.form).unwrap() {
            let id = pattern.id.as_str();
            assert!(
                session.data.values.contains_key(id) || session.data.errors.contains_key(id),
                "{id} dropped"
            );
        }
    }

    #[test]
    fn test_apply_submission_unknown_pattern() {
        let f = fixture();
        let err = apply_submission(
            &f.registry,
            &f.session,
            &PatternId::from("ghost"),
            &FlatValues::new(),
        )
        .unwrap_err();
        assert_eq!(err, SessionError::PatternNotFound(PatternId::from("ghost")));
    }
}
