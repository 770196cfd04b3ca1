//! Response validation against the `StartupPlan` contract.
//!
//! Validation runs in three ordered stages:
//! 1. structural parse of the raw text into a JSON tree,
//! 2. field presence/type checks that report *every* offending field,
//! 3. semantic checks (non-empty lists, roadmap day ordering, score range).
//!
//! The whole pass is deterministic and side-effect free: it never mutates
//! its input, and unknown extra fields are ignored.

use serde_json::{Map, Value};
use thiserror::Error;

use super::types::StartupPlan;

/// Inclusive bounds for `readinessScore`.
const SCORE_RANGE: std::ops::RangeInclusive<i64> = 0..=100;

/// Why a candidate response was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    /// The response text is not parseable JSON, even after stripping
    /// surrounding prose or a Markdown code fence.
    #[error("response is not parseable JSON: {message}")]
    Unparseable { message: String },

    /// One or more fields are missing or have the wrong type. Every
    /// offending field is listed, not just the first.
    #[error("response does not match the plan schema ({} field(s) affected)", fields.len())]
    SchemaMismatch { fields: Vec<FieldIssue> },

    /// The response is well-typed but violates a semantic constraint.
    #[error("plan violates {} constraint(s)", details.len())]
    ConstraintViolation { details: Vec<String> },
}

impl ValidationFailure {
    /// Full multi-line description, suitable for feeding back to the model
    /// in a corrective retry prompt.
    pub fn feedback(&self) -> String {
        match self {
            Self::Unparseable { message } => {
                format!("The response was not parseable JSON: {message}")
            }
            Self::SchemaMismatch { fields } => {
                let mut out = String::from(
                    "The response did not match the required schema. \
                     Fields that were missing or mistyped:\n",
                );
                for field in fields {
                    out.push_str(&format!("- {field}\n"));
                }
                out
            }
            Self::ConstraintViolation { details } => {
                let mut out =
                    String::from("The response was well-formed but violated these constraints:\n");
                for detail in details {
                    out.push_str(&format!("- {detail}\n"));
                }
                out
            }
        }
    }
}

/// A single missing or mistyped field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    /// JSON path in wire (camelCase) form, e.g. `roadmap[2].day`.
    pub path: String,
    /// What the schema requires at that path.
    pub expected: &'static str,
    /// What was actually there (`"missing"` for absent fields).
    pub found: String,
}

impl std::fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "`{}`: expected {}, found {}",
            self.path, self.expected, self.found
        )
    }
}

/// Validate a raw model response against the `StartupPlan` contract.
pub fn validate(raw: &str) -> Result<StartupPlan, ValidationFailure> {
    // Stage 1: structural parse.
    let value = parse_json(raw)?;

    // Stage 2: field presence and types, collecting every issue.
    let issues = check_schema(&value);
    if !issues.is_empty() {
        return Err(ValidationFailure::SchemaMismatch { fields: issues });
    }

    // The shape is now known-good, so serde deserialization cannot fail on
    // structure; any residual error is reported as a root-level issue.
    let plan: StartupPlan =
        serde_json::from_value(value).map_err(|e| ValidationFailure::SchemaMismatch {
            fields: vec![FieldIssue {
                path: "$".to_string(),
                expected: "a StartupPlan object",
                found: e.to_string(),
            }],
        })?;

    // Stage 3: semantic constraints.
    let details = check_constraints(&plan);
    if !details.is_empty() {
        return Err(ValidationFailure::ConstraintViolation { details });
    }

    Ok(plan)
}

// ---------------------------------------------------------------------------
// Stage 1: structural parse
// ---------------------------------------------------------------------------

/// Parse the raw text as JSON, falling back to the first `{`..last `}`
/// substring. CLI model frontends routinely wrap the object in prose or a
/// ```` ```json ```` fence.
fn parse_json(raw: &str) -> Result<Value, ValidationFailure> {
    let trimmed = raw.trim();
    let first_error = match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    if let Some(inner) = extract_json_object(trimmed) {
        if let Ok(value) = serde_json::from_str::<Value>(inner) {
            return Ok(value);
        }
    }

    Err(ValidationFailure::Unparseable {
        message: first_error.to_string(),
    })
}

/// Return the substring spanning the first `{` through the last `}`, if any.
fn extract_json_object(s: &str) -> Option<&str> {
    let start = s.find('{')?;
    let end = s.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(&s[start..=end])
}

// ---------------------------------------------------------------------------
// Stage 2: schema walk
// ---------------------------------------------------------------------------

fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Collects field issues while walking the expected shape.
struct FieldChecker {
    issues: Vec<FieldIssue>,
}

impl FieldChecker {
    fn new() -> Self {
        Self { issues: Vec::new() }
    }

    fn report(&mut self, path: String, expected: &'static str, found: Option<&Value>) {
        self.issues.push(FieldIssue {
            path,
            expected,
            found: found.map_or_else(|| "missing".to_string(), |v| json_type_name(v).to_string()),
        });
    }

    fn check_string(&mut self, obj: &Map<String, Value>, path: &str, key: &str) {
        match obj.get(key) {
            Some(Value::String(_)) => {}
            other => self.report(join(path, key), "string", other),
        }
    }

    fn check_integer(&mut self, obj: &Map<String, Value>, path: &str, key: &str) {
        match obj.get(key) {
            Some(v @ Value::Number(n)) => {
                if n.as_i64().is_none() {
                    self.report(join(path, key), "integer", Some(v));
                }
            }
            other => self.report(join(path, key), "integer", other),
        }
    }

    fn check_string_array(&mut self, obj: &Map<String, Value>, path: &str, key: &str) {
        match obj.get(key) {
            Some(Value::Array(items)) => {
                for (i, item) in items.iter().enumerate() {
                    if !item.is_string() {
                        self.report(format!("{}[{i}]", join(path, key)), "string", Some(item));
                    }
                }
            }
            other => self.report(join(path, key), "array of strings", other),
        }
    }

    fn get_object<'a>(
        &mut self,
        obj: &'a Map<String, Value>,
        path: &str,
        key: &str,
    ) -> Option<&'a Map<String, Value>> {
        match obj.get(key) {
            Some(Value::Object(inner)) => Some(inner),
            other => {
                self.report(join(path, key), "object", other);
                None
            }
        }
    }

    fn get_array<'a>(
        &mut self,
        obj: &'a Map<String, Value>,
        path: &str,
        key: &str,
        expected: &'static str,
    ) -> Option<&'a Vec<Value>> {
        match obj.get(key) {
            Some(Value::Array(items)) => Some(items),
            other => {
                self.report(join(path, key), expected, other);
                None
            }
        }
    }
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

/// Walk the full `StartupPlan` shape, collecting every missing or mistyped
/// field. Unknown extra fields are ignored.
fn check_schema(value: &Value) -> Vec<FieldIssue> {
    let mut checker = FieldChecker::new();

    let Some(root) = value.as_object() else {
        checker.report("$".to_string(), "object", Some(value));
        return checker.issues;
    };

    checker.check_string(root, "", "name");
    checker.check_string(root, "", "elevatorPitch");
    checker.check_string(root, "", "problem");
    checker.check_string(root, "", "targetAudience");
    checker.check_string(root, "", "acquisitionStrategy");
    checker.check_integer(root, "", "readinessScore");

    if let Some(persona) = checker.get_object(root, "", "persona") {
        checker.check_string(persona, "persona", "role");
        checker.check_string(persona, "persona", "behavior");
        checker.check_string(persona, "persona", "location");
        checker.check_string(persona, "persona", "primaryPainPoint");
    }

    if let Some(features) = checker.get_object(root, "", "mvpFeatures") {
        checker.check_string_array(features, "mvpFeatures", "mustHave");
        checker.check_string_array(features, "mvpFeatures", "niceToHave");
    }

    checker.check_string_array(root, "", "pitchOutline");
    checker.check_string_array(root, "", "validationChecklist");

    if let Some(roadmap) = checker.get_array(root, "", "roadmap", "array of day entries") {
        for (i, entry) in roadmap.iter().enumerate() {
            let path = format!("roadmap[{i}]");
            match entry.as_object() {
                Some(day) => {
                    checker.check_integer(day, &path, "day");
                    checker.check_string(day, &path, "task");
                    checker.check_string(day, &path, "goal");
                }
                None => checker.report(path, "object", Some(entry)),
            }
        }
    }

    if let Some(tools) = checker.get_array(root, "", "toolStack", "array of tool entries") {
        for (i, entry) in tools.iter().enumerate() {
            let path = format!("toolStack[{i}]");
            match entry.as_object() {
                Some(tool) => {
                    checker.check_string(tool, &path, "name");
                    checker.check_string(tool, &path, "category");
                    checker.check_string(tool, &path, "reason");
                }
                None => checker.report(path, "object", Some(entry)),
            }
        }
    }

    checker.issues
}

// ---------------------------------------------------------------------------
// Stage 3: semantic constraints
// ---------------------------------------------------------------------------

fn push_if_blank(details: &mut Vec<String>, path: &str, value: &str) {
    if value.trim().is_empty() {
        details.push(format!("`{path}` must not be blank"));
    }
}

fn check_entries(details: &mut Vec<String>, path: &str, entries: &[String], required: bool) {
    if required && !entries.iter().any(|e| !e.trim().is_empty()) {
        details.push(format!("`{path}` must contain at least one non-blank entry"));
    }
    for (i, entry) in entries.iter().enumerate() {
        if entry.trim().is_empty() {
            details.push(format!("`{path}[{i}]` must not be blank"));
        }
    }
}

/// Check the semantic constraints on a well-typed plan.
fn check_constraints(plan: &StartupPlan) -> Vec<String> {
    let mut details = Vec::new();

    push_if_blank(&mut details, "name", &plan.name);
    push_if_blank(&mut details, "elevatorPitch", &plan.elevator_pitch);
    push_if_blank(&mut details, "problem", &plan.problem);
    push_if_blank(&mut details, "targetAudience", &plan.target_audience);
    push_if_blank(
        &mut details,
        "acquisitionStrategy",
        &plan.acquisition_strategy,
    );

    push_if_blank(&mut details, "persona.role", &plan.persona.role);
    push_if_blank(&mut details, "persona.behavior", &plan.persona.behavior);
    push_if_blank(&mut details, "persona.location", &plan.persona.location);
    push_if_blank(
        &mut details,
        "persona.primaryPainPoint",
        &plan.persona.primary_pain_point,
    );

    check_entries(
        &mut details,
        "mvpFeatures.mustHave",
        &plan.mvp_features.must_have,
        true,
    );
    check_entries(
        &mut details,
        "mvpFeatures.niceToHave",
        &plan.mvp_features.nice_to_have,
        false,
    );
    check_entries(&mut details, "pitchOutline", &plan.pitch_outline, true);
    check_entries(
        &mut details,
        "validationChecklist",
        &plan.validation_checklist,
        true,
    );

    if plan.roadmap.is_empty() {
        details.push("`roadmap` must contain at least one day entry".to_string());
    }
    let mut prev_day: Option<i64> = None;
    for (i, entry) in plan.roadmap.iter().enumerate() {
        if i == 0 && entry.day != 1 {
            details.push(format!(
                "`roadmap[0].day` must be 1, found {}",
                entry.day
            ));
        }
        if entry.day < 1 {
            details.push(format!(
                "`roadmap[{i}].day` must be at least 1, found {}",
                entry.day
            ));
        }
        if let Some(prev) = prev_day {
            if entry.day <= prev {
                details.push(format!(
                    "`roadmap[{i}].day` is {} but must be strictly greater than the previous day {}",
                    entry.day, prev
                ));
            }
        }
        prev_day = Some(entry.day);
        push_if_blank(&mut details, &format!("roadmap[{i}].task"), &entry.task);
        push_if_blank(&mut details, &format!("roadmap[{i}].goal"), &entry.goal);
    }

    for (i, tool) in plan.tool_stack.iter().enumerate() {
        push_if_blank(&mut details, &format!("toolStack[{i}].name"), &tool.name);
        push_if_blank(
            &mut details,
            &format!("toolStack[{i}].category"),
            &tool.category,
        );
        push_if_blank(&mut details, &format!("toolStack[{i}].reason"), &tool.reason);
    }

    if !SCORE_RANGE.contains(&plan.readiness_score) {
        details.push(format!(
            "`readinessScore` must be between 0 and 100 inclusive, found {}",
            plan.readiness_score
        ));
    }

    details
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> serde_json::Value {
        serde_json::json!({
            "name": "EcoTiffin",
            "elevatorPitch": "Zero-waste tiffin subscriptions for hostel students.",
            "problem": "Hostel mess food is inflexible and delivery packaging piles up.",
            "targetAudience": "Hostel students in tier-1 college towns",
            "persona": {
                "role": "Second-year engineering student",
                "behavior": "Orders delivery four times a week",
                "location": "Pune",
                "primaryPainPoint": "Guilt over single-use packaging and inconsistent meals"
            },
            "mvpFeatures": {
                "mustHave": ["Weekly subscription ordering", "Steel tiffin swap logistics"],
                "niceToHave": ["Calorie tracking"]
            },
            "pitchOutline": ["Problem", "Solution", "Market", "Ask"],
            "roadmap": [
                {"day": 1, "task": "Interview 10 hostel students", "goal": "Confirm the pain"},
                {"day": 2, "task": "Price out tiffin suppliers", "goal": "Unit economics draft"}
            ],
            "validationChecklist": ["Pre-sell 20 weekly subscriptions"],
            "acquisitionStrategy": "Hostel WhatsApp groups and mess notice boards",
            "toolStack": [
                {"name": "Razorpay", "category": "Payments", "reason": "UPI-first checkout"}
            ],
            "readinessScore": 72
        })
    }

    fn sample_raw() -> String {
        sample_json().to_string()
    }

    #[test]
    fn accepts_well_formed_plan() {
        let plan = validate(&sample_raw()).expect("sample plan should validate");
        assert_eq!(plan.name, "EcoTiffin");
        assert_eq!(plan.roadmap.len(), 2);
    }

    #[test]
    fn accepts_fenced_json() {
        let fenced = format!("```json\n{}\n```", sample_raw());
        let plan = validate(&fenced).expect("fenced JSON should validate");
        assert_eq!(plan.name, "EcoTiffin");
    }

    #[test]
    fn accepts_prose_wrapped_json() {
        let wrapped = format!("Here is your plan:\n{}\nGood luck!", sample_raw());
        let plan = validate(&wrapped).expect("prose-wrapped JSON should validate");
        assert_eq!(plan.name, "EcoTiffin");
    }

    #[test]
    fn rejects_non_json() {
        let err = validate("this is not json at all").unwrap_err();
        assert!(matches!(err, ValidationFailure::Unparseable { .. }));
    }

    #[test]
    fn rejects_non_object_root() {
        let err = validate("[1, 2, 3]").unwrap_err();
        match err {
            ValidationFailure::SchemaMismatch { fields } => {
                assert_eq!(fields[0].path, "$");
                assert_eq!(fields[0].expected, "object");
            }
            other => panic!("expected SchemaMismatch, got: {other}"),
        }
    }

    #[test]
    fn reports_every_missing_field_not_just_first() {
        let mut value = sample_json();
        let obj = value.as_object_mut().unwrap();
        obj.remove("name");
        obj.remove("roadmap");
        obj.remove("readinessScore");

        let err = validate(&value.to_string()).unwrap_err();
        match err {
            ValidationFailure::SchemaMismatch { fields } => {
                let paths: Vec<&str> = fields.iter().map(|f| f.path.as_str()).collect();
                assert!(paths.contains(&"name"));
                assert!(paths.contains(&"roadmap"));
                assert!(paths.contains(&"readinessScore"));
            }
            other => panic!("expected SchemaMismatch, got: {other}"),
        }
    }

    #[test]
    fn reports_mistyped_nested_field() {
        let mut value = sample_json();
        value["persona"]["role"] = serde_json::json!(42);

        let err = validate(&value.to_string()).unwrap_err();
        match err {
            ValidationFailure::SchemaMismatch { fields } => {
                assert_eq!(fields.len(), 1);
                assert_eq!(fields[0].path, "persona.role");
                assert_eq!(fields[0].expected, "string");
                assert_eq!(fields[0].found, "number");
            }
            other => panic!("expected SchemaMismatch, got: {other}"),
        }
    }

    #[test]
    fn reports_fractional_day_as_mistyped() {
        let mut value = sample_json();
        value["roadmap"][0]["day"] = serde_json::json!(1.5);

        let err = validate(&value.to_string()).unwrap_err();
        match err {
            ValidationFailure::SchemaMismatch { fields } => {
                assert_eq!(fields[0].path, "roadmap[0].day");
                assert_eq!(fields[0].expected, "integer");
            }
            other => panic!("expected SchemaMismatch, got: {other}"),
        }
    }

    #[test]
    fn ignores_unknown_extra_fields() {
        let mut value = sample_json();
        value["vibes"] = serde_json::json!("immaculate");
        value["persona"]["age"] = serde_json::json!(20);

        let plan = validate(&value.to_string()).expect("extra fields should be ignored");
        assert_eq!(plan.name, "EcoTiffin");
    }

    #[test]
    fn rejects_duplicate_roadmap_day() {
        let mut value = sample_json();
        value["roadmap"][1]["day"] = serde_json::json!(1);

        let err = validate(&value.to_string()).unwrap_err();
        match err {
            ValidationFailure::ConstraintViolation { details } => {
                assert!(details.iter().any(|d| d.contains("roadmap[1].day")));
            }
            other => panic!("expected ConstraintViolation, got: {other}"),
        }
    }

    #[test]
    fn rejects_roadmap_not_starting_at_one() {
        let mut value = sample_json();
        value["roadmap"][0]["day"] = serde_json::json!(3);
        value["roadmap"][1]["day"] = serde_json::json!(4);

        let err = validate(&value.to_string()).unwrap_err();
        match err {
            ValidationFailure::ConstraintViolation { details } => {
                assert!(details.iter().any(|d| d.contains("roadmap[0].day")));
            }
            other => panic!("expected ConstraintViolation, got: {other}"),
        }
    }

    #[test]
    fn rejects_empty_must_have() {
        let mut value = sample_json();
        value["mvpFeatures"]["mustHave"] = serde_json::json!([]);

        let err = validate(&value.to_string()).unwrap_err();
        match err {
            ValidationFailure::ConstraintViolation { details } => {
                assert!(details.iter().any(|d| d.contains("mvpFeatures.mustHave")));
            }
            other => panic!("expected ConstraintViolation, got: {other}"),
        }
    }

    #[test]
    fn allows_empty_nice_to_have_and_tool_stack() {
        let mut value = sample_json();
        value["mvpFeatures"]["niceToHave"] = serde_json::json!([]);
        value["toolStack"] = serde_json::json!([]);

        validate(&value.to_string()).expect("optional lists may be empty");
    }

    #[test]
    fn rejects_blank_string_entries() {
        let mut value = sample_json();
        value["pitchOutline"] = serde_json::json!(["Problem", "   "]);

        let err = validate(&value.to_string()).unwrap_err();
        match err {
            ValidationFailure::ConstraintViolation { details } => {
                assert!(details.iter().any(|d| d.contains("pitchOutline[1]")));
            }
            other => panic!("expected ConstraintViolation, got: {other}"),
        }
    }

    #[test]
    fn rejects_out_of_range_score() {
        for score in [-1, 101, 250] {
            let mut value = sample_json();
            value["readinessScore"] = serde_json::json!(score);

            let err = validate(&value.to_string()).unwrap_err();
            match err {
                ValidationFailure::ConstraintViolation { details } => {
                    assert!(
                        details.iter().any(|d| d.contains("readinessScore")),
                        "score {score} should be flagged"
                    );
                }
                other => panic!("expected ConstraintViolation for {score}, got: {other}"),
            }
        }
    }

    #[test]
    fn accepts_boundary_scores() {
        for score in [0, 100] {
            let mut value = sample_json();
            value["readinessScore"] = serde_json::json!(score);
            validate(&value.to_string())
                .unwrap_or_else(|e| panic!("score {score} should be valid: {e}"));
        }
    }

    #[test]
    fn validate_is_idempotent() {
        let raw = sample_raw();
        let first = validate(&raw);
        let second = validate(&raw);
        assert_eq!(first, second);

        let mut bad = sample_json();
        bad["roadmap"][1]["day"] = serde_json::json!(1);
        let bad_raw = bad.to_string();
        assert_eq!(validate(&bad_raw), validate(&bad_raw));
    }

    #[test]
    fn feedback_lists_affected_fields() {
        let mut value = sample_json();
        let obj = value.as_object_mut().unwrap();
        obj.remove("name");
        obj.remove("problem");

        let err = validate(&value.to_string()).unwrap_err();
        let feedback = err.feedback();
        assert!(feedback.contains("`name`"));
        assert!(feedback.contains("`problem`"));
        assert!(feedback.contains("missing"));
    }
}
