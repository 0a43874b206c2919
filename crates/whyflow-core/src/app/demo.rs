//! Demo data - 全フィールドを埋めた "Competitor Product Selection" の実行例
//!
//! 実データが無いときのサンプルとして使います。
//! 値はハードコードで、呼び出しごとに変わるのは `executionId` と `timestamp` だけです。

use serde_json::json;

use super::builder::{ExecutionFactory, SystemExecutionFactory};
use crate::domain::{DecisionExecution, DecisionStep};
use crate::ports::{Clock, IdGenerator};

pub const DEMO_EXECUTION_NAME: &str = "Competitor Product Selection";

/// 壁時計と新しい ID でデモ実行を作成
pub fn competitor_selection_execution() -> DecisionExecution {
    competitor_selection_execution_with(&SystemExecutionFactory::system())
}

/// 指定の factory でデモ実行を作成（テストで ID / 時刻を固定できる）
pub fn competitor_selection_execution_with<C: Clock, G: IdGenerator>(
    factory: &ExecutionFactory<C, G>,
) -> DecisionExecution {
    factory
        .create(DEMO_EXECUTION_NAME, None)
        .step(keyword_generation())
        .step(candidate_search())
        .step(deduplicate_candidates())
        .step(apply_filters())
        .step(relevance_evaluation())
        .step(rank_and_select())
        .finish()
}

fn keyword_generation() -> DecisionStep {
    DecisionStep::new("Keyword Generation")
        .with_input(json!({
            "product_title": "Stainless Steel Water Bottle 32oz Insulated",
            "category": "Sports & Outdoors",
        }))
        .with_output(json!({
            "keywords": [
                "stainless steel water bottle insulated",
                "vacuum insulated bottle 32oz",
            ],
            "model": "gpt-4",
        }))
        .with_rationale(
            "Extracted key product attributes: material (stainless steel), capacity (32oz), feature (insulated)",
        )
        .with_step_type("llm_generation")
}

fn candidate_search() -> DecisionStep {
    DecisionStep::new("Candidate Search")
        .with_input(json!({
            "keyword": "stainless steel water bottle insulated",
            "limit": 50,
        }))
        .with_output(json!({
            "total_results": 2847,
            "candidates_fetched": 50,
            "candidates": [
                { "asin": "B0COMP01", "title": "HydroFlask 32oz Wide Mouth", "price": 44.99, "rating": 4.5, "reviews": 8932 },
                { "asin": "B0COMP02", "title": "Yeti Rambler 26oz", "price": 34.99, "rating": 4.4, "reviews": 5621 },
                { "asin": "B0COMP03", "title": "Generic Water Bottle", "price": 8.99, "rating": 3.2, "reviews": 45 },
                { "asin": "B0COMP04", "title": "Bottle Cleaning Brush Set", "price": 12.99, "rating": 4.6, "reviews": 3421 },
                { "asin": "B0COMP05", "title": "Replacement Lid for HydroFlask", "price": 9.99, "rating": 4.1, "reviews": 892 },
                { "asin": "B0COMP06", "title": "Water Bottle Carrier Bag with Strap", "price": 15.99, "rating": 4.3, "reviews": 654 },
                { "asin": "B0COMP07", "title": "Stanley Adventure Quencher 30oz", "price": 35.0, "rating": 4.3, "reviews": 4102 },
                { "asin": "B0COMP08", "title": "Contigo AutoSeal Travel Mug", "price": 22.99, "rating": 4.2, "reviews": 3245 },
            ],
        }))
        .with_rationale("Fetched top 50 results by relevance; 2847 total matches found")
        .with_step_type("api_search")
        .with_metadata("search_provider", "mock_amazon_api")
}

fn deduplicate_candidates() -> DecisionStep {
    DecisionStep::new("Deduplicate Candidates")
        .with_input(json!({
            "candidates_count": 50,
            "match_keys": ["asin", "normalized_title"],
        }))
        .with_output(json!({
            "unique_candidates": 50,
            "duplicates_removed": 0,
            "reference_product_excluded": {
                "asin": "B0XYZ123",
                "present_in_results": false,
            },
        }))
        .with_rationale(
            "No duplicate listings or self-matches against the reference product; all 50 candidates carried forward",
        )
        .with_step_type("dedupe")
}

fn apply_filters() -> DecisionStep {
    DecisionStep::new("Apply Filters")
        .with_input(json!({
            "candidates_count": 50,
            "reference_product": {
                "asin": "B0XYZ123",
                "title": "ProBrand Steel Bottle 32oz Insulated",
                "price": 29.99,
                "rating": 4.2,
                "reviews": 1247,
            },
        }))
        .with_field(
            "filters_applied",
            json!({
                "price_range": { "min": 14.99, "max": 59.98, "rule": "0.5x - 2x of reference price" },
                "min_rating": { "value": 3.8, "rule": "Must be at least 3.8 stars" },
                "min_reviews": { "value": 100, "rule": "Must have at least 100 reviews" },
            }),
        )
        .with_field(
            "evaluations",
            json!([
                {
                    "asin": "B0COMP01",
                    "title": "HydroFlask 32oz Wide Mouth",
                    "metrics": { "price": 44.99, "rating": 4.5, "reviews": 8932 },
                    "filter_results": {
                        "price_range": { "passed": true, "detail": "$44.99 is within $14.99-$59.98" },
                        "min_rating": { "passed": true, "detail": "4.5 >= 3.8" },
                        "min_reviews": { "passed": true, "detail": "8932 >= 100" },
                    },
                    "qualified": true,
                },
                {
                    "asin": "B0COMP02",
                    "title": "Yeti Rambler 26oz",
                    "metrics": { "price": 34.99, "rating": 4.4, "reviews": 5621 },
                    "filter_results": {
                        "price_range": { "passed": true, "detail": "$34.99 is within $14.99-$59.98" },
                        "min_rating": { "passed": true, "detail": "4.4 >= 3.8" },
                        "min_reviews": { "passed": true, "detail": "5621 >= 100" },
                    },
                    "qualified": true,
                },
                {
                    "asin": "B0COMP03",
                    "title": "Generic Water Bottle",
                    "metrics": { "price": 8.99, "rating": 3.2, "reviews": 45 },
                    "filter_results": {
                        "price_range": { "passed": false, "detail": "$8.99 is below minimum $14.99" },
                        "min_rating": { "passed": false, "detail": "3.2 < 3.8 threshold" },
                        "min_reviews": { "passed": false, "detail": "45 < 100 minimum" },
                    },
                    "qualified": false,
                },
                {
                    "asin": "B0COMP04",
                    "title": "Bottle Cleaning Brush Set",
                    "metrics": { "price": 12.99, "rating": 4.6, "reviews": 3421 },
                    "filter_results": {
                        "price_range": { "passed": false, "detail": "$12.99 is below minimum $14.99" },
                        "min_rating": { "passed": true, "detail": "4.6 >= 3.8" },
                        "min_reviews": { "passed": true, "detail": "3421 >= 100" },
                    },
                    "qualified": false,
                },
            ]),
        )
        .with_output(json!({
            "total_evaluated": 50,
            "passed": 12,
            "failed": 38,
            "qualified_products": [
                { "asin": "B0COMP01", "title": "HydroFlask 32oz Wide Mouth", "price": 44.99, "rating": 4.5, "reviews": 8932 },
                { "asin": "B0COMP02", "title": "Yeti Rambler 26oz", "price": 34.99, "rating": 4.4, "reviews": 5621 },
                { "asin": "B0COMP07", "title": "Stanley Adventure Quencher 30oz", "price": 35.0, "rating": 4.3, "reviews": 4102 },
                { "asin": "B0COMP08", "title": "Contigo AutoSeal Travel Mug", "price": 22.99, "rating": 4.2, "reviews": 3245 },
            ],
        }))
        .with_rationale(
            "Applied price, rating, and review count filters to narrow candidates from 50 to 12",
        )
        .with_step_type("filter")
}

fn relevance_evaluation() -> DecisionStep {
    DecisionStep::new("LLM Relevance Evaluation")
        .with_input(json!({
            "candidates_count": 12,
            "reference_product": {
                "asin": "B0XYZ123",
                "title": "ProBrand Steel Bottle 32oz Insulated",
                "category": "Sports & Outdoors > Water Bottles",
            },
            "model": "gpt-4",
        }))
        .with_field(
            "prompt_template",
            "Given the reference product '{title}', determine if each candidate is a true competitor (same product type) or a false positive (accessory, replacement part, bundle, etc.)",
        )
        .with_field(
            "evaluations",
            json!([
                { "asin": "B0COMP01", "title": "HydroFlask 32oz Wide Mouth", "is_competitor": true, "confidence": 0.95 },
                { "asin": "B0COMP02", "title": "Yeti Rambler 26oz", "is_competitor": true, "confidence": 0.92 },
                { "asin": "B0COMP05", "title": "Replacement Lid for HydroFlask", "is_competitor": false, "confidence": 0.98 },
                { "asin": "B0COMP06", "title": "Water Bottle Carrier Bag with Strap", "is_competitor": false, "confidence": 0.97 },
                { "asin": "B0COMP07", "title": "Stanley Adventure Quencher 30oz", "is_competitor": true, "confidence": 0.89 },
                { "asin": "B0COMP08", "title": "Contigo AutoSeal Travel Mug", "is_competitor": true, "confidence": 0.85 },
            ]),
        )
        .with_output(json!({
            "total_evaluated": 12,
            "confirmed_competitors": 8,
            "false_positives_removed": 4,
            "qualified_competitors": [
                { "asin": "B0COMP01", "title": "HydroFlask 32oz Wide Mouth", "is_competitor": true, "confidence": 0.95 },
                { "asin": "B0COMP02", "title": "Yeti Rambler 26oz", "is_competitor": true, "confidence": 0.92 },
                { "asin": "B0COMP07", "title": "Stanley Adventure Quencher 30oz", "is_competitor": true, "confidence": 0.89 },
                { "asin": "B0COMP08", "title": "Contigo AutoSeal Travel Mug", "is_competitor": true, "confidence": 0.85 },
            ],
        }))
        .with_rationale(
            "LLM identified and removed 4 false positives (accessories and replacement parts)",
        )
        .with_step_type("llm_evaluation")
}

fn rank_and_select() -> DecisionStep {
    DecisionStep::new("Rank and Select")
        .with_input(json!({
            "candidates_count": 8,
            "reference_product": {
                "asin": "B0XYZ123",
                "title": "ProBrand Steel Bottle 32oz Insulated",
                "price": 29.99,
                "rating": 4.2,
                "reviews": 1247,
            },
        }))
        .with_field(
            "ranking_criteria",
            json!({
                "primary": "review_count",
                "secondary": "rating",
                "tertiary": "price_proximity",
            }),
        )
        .with_field(
            "ranked_candidates",
            json!([
                {
                    "rank": 1,
                    "asin": "B0COMP01",
                    "title": "HydroFlask 32oz Wide Mouth",
                    "metrics": { "price": 44.99, "rating": 4.5, "reviews": 8932 },
                    "score_breakdown": { "review_count_score": 1.0, "rating_score": 0.9, "price_proximity_score": 0.7 },
                    "total_score": 0.92,
                },
                {
                    "rank": 2,
                    "asin": "B0COMP02",
                    "title": "Yeti Rambler 26oz",
                    "metrics": { "price": 34.99, "rating": 4.4, "reviews": 5621 },
                    "score_breakdown": { "review_count_score": 0.63, "rating_score": 0.85, "price_proximity_score": 0.85 },
                    "total_score": 0.74,
                },
                {
                    "rank": 3,
                    "asin": "B0COMP07",
                    "title": "Stanley Adventure Quencher",
                    "metrics": { "price": 35.0, "rating": 4.3, "reviews": 4102 },
                    "score_breakdown": { "review_count_score": 0.46, "rating_score": 0.8, "price_proximity_score": 0.84 },
                    "total_score": 0.65,
                },
            ]),
        )
        .with_output(json!({
            "selected_competitor": {
                "asin": "B0COMP01",
                "title": "HydroFlask 32oz Wide Mouth",
                "price": 44.99,
                "rating": 4.5,
                "reviews": 8932,
            },
        }))
        .with_rationale(
            "Highest overall score (0.92) - top review count (8,932) with strong rating (4.5★)",
        )
        .with_step_type("ranking")
        .with_metadata(
            "selection_reason",
            "Selected based on highest total score combining review count, rating, and price proximity",
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{FixedClock, FixedEntropy, PrefixedIdGenerator};
    use chrono::{TimeZone, Utc};

    #[test]
    fn demo_has_six_steps_in_pipeline_order() {
        let execution = competitor_selection_execution();
        let names: Vec<_> = execution.steps().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Keyword Generation",
                "Candidate Search",
                "Deduplicate Candidates",
                "Apply Filters",
                "LLM Relevance Evaluation",
                "Rank and Select",
            ]
        );
        assert_eq!(execution.name(), DEMO_EXECUTION_NAME);
    }

    #[test]
    fn demo_selects_b0comp01() {
        let execution = competitor_selection_execution();
        let last = execution.steps().last().unwrap();
        let output = last.output.as_ref().unwrap();
        assert_eq!(output["selected_competitor"]["asin"], "B0COMP01");
    }

    #[test]
    fn every_demo_step_is_classified() {
        let execution = competitor_selection_execution();
        assert!(execution.steps().iter().all(|s| s.step_type().is_some()));
        assert!(execution.steps().iter().all(|s| s.rationale.is_some()));
    }

    #[test]
    fn step_level_extras_sit_at_top_level() {
        let v = serde_json::to_value(competitor_selection_execution()).unwrap();
        assert_eq!(v["steps"][3]["filters_applied"]["min_reviews"]["value"], 100);
        assert_eq!(v["steps"][5]["ranking_criteria"]["primary"], "review_count");
        assert!(v["steps"][4]["prompt_template"].is_string());
    }

    #[test]
    fn only_header_varies_between_calls() {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap());
        let a = competitor_selection_execution_with(&ExecutionFactory::new(
            clock,
            PrefixedIdGenerator::new(clock, FixedEntropy(1)),
        ));
        let b = competitor_selection_execution_with(&ExecutionFactory::new(
            clock,
            PrefixedIdGenerator::new(clock, FixedEntropy(2)),
        ));

        assert_eq!(a.execution_id().as_str(), "exec_1704110400000_0000001");
        assert_ne!(a.execution_id(), b.execution_id());
        assert_eq!(a.timestamp(), b.timestamp());
        assert_eq!(a.steps(), b.steps());
    }
}
