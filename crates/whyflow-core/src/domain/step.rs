//! DecisionStep - パイプラインの 1 ステージ
//!
//! Step は open record です。既知のキー（`name`, `input`, `output`,
//! `rationale`, `metadata`）は型付きフィールドに入り、それ以外のトップレベル
//! キーは residual map（`extra`）に入ってトップレベルに書き戻されます。
//!
//! # 寛容なデコード
//! - 必須なのは文字列の `name` だけ
//! - `rationale` が文字列でない / `metadata` がオブジェクトでない場合（`null` 含む）、
//!   その値は生のまま `extra` に残る（ラウンドトリップで消えない）
//! - キー順はドキュメント順のまま（serde_json の `preserve_order`）

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// presentation がステップのラベル付けに使う metadata キー
///
/// 慣習にすぎず、モデルは要求しない。
pub const STEP_TYPE_KEY: &str = "step_type";

/// 型付きフィールドが持つトップレベルキー
///
/// `name` / `input` / `output` は常に型付きフィールドに入る。
/// `rationale` / `metadata` は型が合わないときだけ `extra` に残る。
pub const RESERVED_KEYS: [&str; 5] = ["name", "input", "output", "rationale", "metadata"];

/// DecisionStep は意思決定パイプラインの 1 単位
///
/// `input` / `output` は「無い」と「null がある」を区別する:
/// `{"name": "x", "input": null}` は `Some(Value::Null)` を保持し、
/// `null` をそのまま書き戻す。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawStep")]
pub struct DecisionStep {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,

    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// デコード用の中間表現
///
/// `name` / `input` / `output` 以外はすべて `rest` に集め、
/// `with_field` と同じ振り分けを通す。
#[derive(Deserialize)]
struct RawStep {
    name: String,

    #[serde(default, deserialize_with = "present_value")]
    input: Option<Value>,

    #[serde(default, deserialize_with = "present_value")]
    output: Option<Value>,

    #[serde(flatten)]
    rest: Map<String, Value>,
}

/// キーが存在すれば値が `null` でも `Some`
fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl From<RawStep> for DecisionStep {
    fn from(raw: RawStep) -> Self {
        let mut step = DecisionStep::new(raw.name);
        step.input = raw.input;
        step.output = raw.output;
        raw.rest
            .into_iter()
            .fold(step, |step, (key, value)| step.with_field(key, value))
    }
}

impl DecisionStep {
    /// name だけの Step を作成（オプションはすべて absent）
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            input: None,
            output: None,
            rationale: None,
            metadata: None,
            extra: Map::new(),
        }
    }

    pub fn with_input(mut self, input: impl Into<Value>) -> Self {
        self.input = Some(input.into());
        self
    }

    pub fn with_output(mut self, output: impl Into<Value>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_rationale(mut self, rationale: impl Into<String>) -> Self {
        self.extra.shift_remove("rationale");
        self.rationale = Some(rationale.into());
        self
    }

    /// metadata に 1 エントリ追加（初回に map を作成）
    ///
    /// `extra` に生の `metadata` が残っていれば、それは捨てて型付き map に置き換える。
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.shift_remove("metadata");
        self.metadata
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn with_step_type(self, step_type: impl Into<String>) -> Self {
        self.with_metadata(STEP_TYPE_KEY, Value::String(step_type.into()))
    }

    /// 任意のトップレベルキーを設定（後勝ち）
    ///
    /// - `input` / `output`: そのまま型付きフィールドへ
    /// - `rationale` / `metadata`: 型が合えば型付きフィールド、合わなければ生の値を `extra` へ
    /// - `name`: 文字列のときだけ反映（それ以外は warn して無視）
    /// - その他: `extra` へ
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        let value = value.into();
        match key.as_str() {
            "input" => self.input = Some(value),
            "output" => self.output = Some(value),
            "name" => match value {
                Value::String(name) => self.name = name,
                other => tracing::warn!(%other, "ignoring non-string step name"),
            },
            "rationale" => match value {
                Value::String(rationale) => {
                    self.extra.shift_remove("rationale");
                    self.rationale = Some(rationale);
                }
                other => {
                    self.rationale = None;
                    self.extra.insert(key, other);
                }
            },
            "metadata" => match value {
                Value::Object(metadata) => {
                    self.extra.shift_remove("metadata");
                    self.metadata = Some(metadata);
                }
                other => {
                    self.metadata = None;
                    self.extra.insert(key, other);
                }
            },
            _ => {
                self.extra.insert(key, value);
            }
        }
        self
    }

    /// 慣習的な `metadata.step_type`（文字列のときだけ）
    pub fn step_type(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.get(STEP_TYPE_KEY))
            .and_then(Value::as_str)
    }

    /// 既知キー以外のトップレベルキー（ドキュメント順）
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn name_only_step_serializes_to_name_only() {
        let step = DecisionStep::new("Keyword Generation");
        let v = serde_json::to_value(&step).unwrap();
        assert_eq!(v, json!({ "name": "Keyword Generation" }));
    }

    #[test]
    fn extra_keys_survive_roundtrip_at_top_level() {
        let raw = json!({
            "name": "Apply Filters",
            "input": { "candidates_count": 50 },
            "filters_applied": { "min_rating": { "value": 3.8 } },
            "evaluations": [ { "asin": "B0COMP01", "qualified": true } ],
            "metadata": { "step_type": "filter" }
        });

        let step: DecisionStep = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(step.extra().len(), 2);
        assert_eq!(step.field("evaluations").unwrap()[0]["asin"], "B0COMP01");
        assert_eq!(step.step_type(), Some("filter"));

        let back = serde_json::to_value(&step).unwrap();
        assert_eq!(back, raw);
    }

    #[test]
    fn extra_keys_keep_document_order() {
        let step: DecisionStep = serde_json::from_str(
            r#"{ "name": "x", "zeta": 1, "alpha": 2, "metadata": { "z_key": 1, "a_key": 2 } }"#,
        )
        .unwrap();

        let extra: Vec<&str> = step.extra().keys().map(String::as_str).collect();
        assert_eq!(extra, ["zeta", "alpha"]);
        let metadata: Vec<&str> = step.metadata.as_ref().unwrap().keys().map(String::as_str).collect();
        assert_eq!(metadata, ["z_key", "a_key"]);
    }

    #[test]
    fn present_null_input_is_not_absent() {
        let step: DecisionStep = serde_json::from_value(json!({ "name": "x", "input": null })).unwrap();
        assert_eq!(step.input, Some(Value::Null));
        assert_eq!(step.output, None);

        let s = serde_json::to_string(&step).unwrap();
        let back: DecisionStep = serde_json::from_str(&s).unwrap();
        assert_eq!(back, step);
    }

    #[rstest]
    #[case::numeric_rationale(json!({ "name": "x", "rationale": 5 }), "rationale")]
    #[case::null_rationale(json!({ "name": "x", "rationale": null }), "rationale")]
    #[case::array_metadata(json!({ "name": "x", "metadata": [1] }), "metadata")]
    #[case::null_metadata(json!({ "name": "x", "metadata": null }), "metadata")]
    fn ill_typed_reserved_value_is_kept_raw(#[case] raw: Value, #[case] key: &str) {
        let step: DecisionStep = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(step.rationale, None);
        assert_eq!(step.metadata, None);
        assert_eq!(step.field(key), raw.get(key));

        assert_eq!(serde_json::to_value(&step).unwrap(), raw);
    }

    #[test]
    fn step_type_is_only_read_when_string() {
        let step = DecisionStep::new("x").with_metadata(STEP_TYPE_KEY, 7);
        assert_eq!(step.step_type(), None);

        let step = DecisionStep::new("x").with_step_type("ranking");
        assert_eq!(step.step_type(), Some("ranking"));
    }

    #[test]
    fn with_field_routes_reserved_keys_to_typed_fields() {
        let step = DecisionStep::new("x")
            .with_field("output", json!({ "ok": true }))
            .with_field("rationale", "because")
            .with_field("metadata", json!({ "step_type": "filter" }))
            .with_field("ranking_criteria", json!({ "primary": "review_count" }));

        assert_eq!(step.output, Some(json!({ "ok": true })));
        assert_eq!(step.rationale.as_deref(), Some("because"));
        assert_eq!(step.step_type(), Some("filter"));
        assert_eq!(step.extra().len(), 1);
        assert!(RESERVED_KEYS.iter().all(|k| step.field(k).is_none()));
    }

    #[test]
    fn last_write_wins_between_typed_and_raw() {
        let step = DecisionStep::new("x")
            .with_field("metadata", json!({ "step_type": "filter" }))
            .with_field("metadata", 3);
        assert_eq!(step.metadata, None);
        assert_eq!(step.field("metadata"), Some(&json!(3)));

        let step = step.with_step_type("rank");
        assert_eq!(step.step_type(), Some("rank"));
        assert!(step.field("metadata").is_none());
    }

    #[test]
    fn missing_name_is_rejected() {
        let err = serde_json::from_value::<DecisionStep>(json!({ "input": 1 })).unwrap_err();
        assert!(err.to_string().contains("name"));
    }
}
