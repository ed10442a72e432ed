// ═══════════════════════════════════════════════════════════════════
// Service Tests — ScoreService, PortfolioService, display helpers,
// EsgPortfolio facade
// ═══════════════════════════════════════════════════════════════════

use esg_portfolio_core::errors::CoreError;
use esg_portfolio_core::models::category::Category;
use esg_portfolio_core::models::holding::{Holding, RawHolding};
use esg_portfolio_core::models::portfolio::Portfolio;
use esg_portfolio_core::models::score::SubScore;
use esg_portfolio_core::models::settings::WeightingPolicy;
use esg_portfolio_core::services::display::{format_amount, score_color};
use esg_portfolio_core::services::portfolio_service::PortfolioService;
use esg_portfolio_core::services::score_service::{format_score, round_to_tenth, ScoreService};
use esg_portfolio_core::EsgPortfolio;

fn holding(ticker: &str, weight: f64, scores: [f64; 3]) -> Holding {
    Holding::with_scores(ticker, weight, scores).unwrap()
}

/// A holding built field by field, bypassing the constructor's checks.
fn unchecked(ticker: &str, amount: f64) -> Holding {
    Holding {
        ticker: ticker.to_string(),
        name: None,
        amount_invested: amount,
        scores: vec![],
    }
}

fn raw(ticker: &str, amount: Option<f64>, price: Option<f64>, scores: &[&str]) -> RawHolding {
    RawHolding {
        ticker: ticker.to_string(),
        name: None,
        amount_invested: amount,
        price,
        sub_scores: scores.iter().map(|s| s.to_string()).collect(),
    }
}

// ═══════════════════════════════════════════════════════════════════
// ScoreService — category scores
// ═══════════════════════════════════════════════════════════════════

mod category_scores {
    use super::*;

    #[test]
    fn empty_portfolio_is_all_zero() {
        let scores = ScoreService::new().compute_category_scores(&[]);
        for (_, score) in scores.iter() {
            assert_eq!(score, 0.0);
        }
    }

    #[test]
    fn single_holding_returns_its_scores() {
        let scores = ScoreService::new()
            .compute_category_scores(&[holding("A", 100.0, [8.0, 6.0, 4.0])]);
        assert_eq!(scores.environmental, 8.0);
        assert_eq!(scores.social, 6.0);
        assert_eq!(scores.governance, 4.0);
    }

    #[test]
    fn equal_weights_average() {
        let scores = ScoreService::new().compute_category_scores(&[
            holding("A", 100.0, [10.0, 10.0, 10.0]),
            holding("B", 100.0, [0.0, 0.0, 0.0]),
        ]);
        for (_, score) in scores.iter() {
            assert_eq!(score, 5.0);
        }
    }

    #[test]
    fn unequal_weights_favour_larger_position() {
        let scores = ScoreService::new().compute_category_scores(&[
            holding("A", 300.0, [10.0, 10.0, 10.0]),
            holding("B", 100.0, [0.0, 0.0, 0.0]),
        ]);
        for (_, score) in scores.iter() {
            assert_eq!(score, 7.5);
        }
    }

    #[test]
    fn malformed_score_only_affects_its_category() {
        let a = Holding::from_raw(
            raw("A", Some(100.0), None, &["abc/10", "6/10", "4/10"]),
            WeightingPolicy::AmountInvested,
        )
        .unwrap();
        let b = holding("B", 100.0, [8.0, 8.0, 8.0]);

        let scores = ScoreService::new().compute_category_scores(&[a, b]);
        // A's weight still counts towards the denominator.
        assert_eq!(scores.environmental, 4.0);
        assert_eq!(scores.social, 7.0);
        assert_eq!(scores.governance, 6.0);
    }

    #[test]
    fn short_score_list_contributes_what_it_has() {
        let a = Holding::new("A", 100.0, vec![Some(SubScore::new(6.0).unwrap())]).unwrap();
        let scores = ScoreService::new().compute_category_scores(&[a]);
        assert_eq!(scores.environmental, 6.0);
        assert_eq!(scores.social, 0.0);
        assert_eq!(scores.governance, 0.0);
    }

    #[test]
    fn scores_past_last_category_are_ignored() {
        let a = Holding::from_raw(
            raw("A", Some(10.0), None, &["1/10", "2/10", "3/10", "10/10"]),
            WeightingPolicy::AmountInvested,
        )
        .unwrap();
        let service = ScoreService::new();
        let scores = service.compute_category_scores(std::slice::from_ref(&a));
        assert_eq!(scores.governance, 3.0);
        assert_eq!(service.compute_overall_score(&[a]), 2.0);
    }

    #[test]
    fn zero_total_weight_is_sentinel_zero() {
        let scores = ScoreService::new().compute_category_scores(&[
            holding("A", 0.0, [9.0, 9.0, 9.0]),
            holding("B", 0.0, [3.0, 3.0, 3.0]),
        ]);
        assert_eq!(scores.environmental, 0.0);
        assert_eq!(scores.social, 0.0);
        assert_eq!(scores.governance, 0.0);
    }

    #[test]
    fn rounds_to_one_decimal() {
        // Sample dashboard portfolio weighted by quoted price.
        let scores = ScoreService::new().compute_category_scores(&[
            holding("AAPL", 150.0, [8.0, 4.0, 9.0]),
            holding("TSLA", 700.0, [7.0, 5.0, 2.0]),
        ]);
        assert_eq!(scores.environmental, 7.2);
        assert_eq!(scores.social, 4.8);
        assert_eq!(scores.governance, 3.2);
    }

    #[test]
    fn midpoint_average_rounds_stored_value() {
        // (1.4 + 1.5) / 2 lands on the double just below 1.45.
        let scores = ScoreService::new().compute(&[
            holding("A", 100.0, [1.4, 1.4, 1.4]),
            holding("B", 100.0, [1.5, 1.5, 1.5]),
        ]);
        assert_eq!(scores.category_scores.environmental, 1.4);
        assert_eq!(scores.category_scores.social, 1.4);
        assert_eq!(scores.category_scores.governance, 1.4);
        assert_eq!(scores.overall_score, 1.4);
    }

    #[test]
    fn every_category_stays_within_scale() {
        let cases = vec![
            vec![holding("A", 1.0, [10.0, 10.0, 10.0])],
            vec![holding("A", 1e9, [0.0, 10.0, 5.5]), holding("B", 0.01, [10.0, 0.0, 9.9])],
            vec![
                holding("A", 33.3, [1.1, 2.2, 3.3]),
                holding("B", 66.6, [9.9, 8.8, 7.7]),
                holding("C", 12.0, [5.0, 5.0, 5.0]),
            ],
        ];
        let service = ScoreService::new();
        for holdings in cases {
            let scores = service.compute_category_scores(&holdings);
            assert_eq!(scores.iter().count(), Category::COUNT);
            for (_, score) in scores.iter() {
                assert!((0.0..=10.0).contains(&score), "score {score} out of range");
            }
        }
    }

    #[test]
    fn holding_order_does_not_matter() {
        let mut holdings = vec![
            holding("A", 120.0, [3.0, 7.0, 1.0]),
            holding("B", 80.0, [9.0, 2.0, 6.0]),
            holding("C", 45.0, [5.5, 5.5, 5.5]),
        ];
        let service = ScoreService::new();
        let forward = service.compute(&holdings);
        holdings.reverse();
        assert_eq!(service.compute(&holdings), forward);
    }
}

// ═══════════════════════════════════════════════════════════════════
// ScoreService — overall score
// ═══════════════════════════════════════════════════════════════════

mod overall_score {
    use super::*;

    #[test]
    fn empty_portfolio_is_zero() {
        assert_eq!(ScoreService::new().compute_overall_score(&[]), 0.0);
    }

    #[test]
    fn single_holding_is_mean_of_its_scores() {
        let overall =
            ScoreService::new().compute_overall_score(&[holding("A", 100.0, [8.0, 6.0, 4.0])]);
        assert_eq!(overall, 6.0);
    }

    #[test]
    fn equal_weights() {
        let overall = ScoreService::new().compute_overall_score(&[
            holding("A", 100.0, [10.0, 10.0, 10.0]),
            holding("B", 100.0, [0.0, 0.0, 0.0]),
        ]);
        assert_eq!(overall, 5.0);
    }

    #[test]
    fn unequal_weights() {
        let overall = ScoreService::new().compute_overall_score(&[
            holding("A", 300.0, [10.0, 10.0, 10.0]),
            holding("B", 100.0, [0.0, 0.0, 0.0]),
        ]);
        assert_eq!(overall, 7.5);
    }

    #[test]
    fn computed_from_raw_sums_not_rounded_categories() {
        let holdings = [holding("A", 1.0, [0.25, 0.25, 0.5])];
        let service = ScoreService::new();
        let scores = service.compute(&holdings);

        assert_eq!(scores.category_scores.environmental, 0.3);
        assert_eq!(scores.category_scores.social, 0.3);
        assert_eq!(scores.category_scores.governance, 0.5);
        // Mean of the rounded categories would give 0.4.
        assert_eq!(scores.overall_score, 0.3);
    }

    #[test]
    fn malformed_score_lowers_overall() {
        let a = Holding::from_raw(
            raw("A", Some(100.0), None, &["abc/10", "6/10", "4/10"]),
            WeightingPolicy::AmountInvested,
        )
        .unwrap();
        let b = holding("B", 100.0, [8.0, 8.0, 8.0]);
        assert_eq!(ScoreService::new().compute_overall_score(&[a, b]), 5.7);
    }

    #[test]
    fn compute_matches_separate_calls() {
        let holdings = vec![
            holding("AAPL", 150.0, [8.0, 4.0, 9.0]),
            holding("TSLA", 700.0, [7.0, 5.0, 2.0]),
        ];
        let service = ScoreService::new();
        let combined = service.compute(&holdings);
        assert_eq!(combined.category_scores, service.compute_category_scores(&holdings));
        assert_eq!(combined.overall_score, service.compute_overall_score(&holdings));
        assert_eq!(combined.overall_score, 5.1);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let holdings = vec![
            holding("A", 10.0, [1.0, 2.0, 3.0]),
            holding("B", 20.0, [4.0, 5.0, 6.0]),
        ];
        let service = ScoreService::new();
        assert_eq!(service.compute(&holdings), service.compute(&holdings));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Formatting helpers
// ═══════════════════════════════════════════════════════════════════

mod formatting {
    use super::*;

    #[test]
    fn format_score_zero_is_dash() {
        assert_eq!(format_score(0.0), "-");
    }

    #[test]
    fn format_score_always_one_decimal() {
        assert_eq!(format_score(6.0), "6.0 / 10");
        assert_eq!(format_score(7.5), "7.5 / 10");
        assert_eq!(format_score(10.0), "10.0 / 10");
    }

    #[test]
    fn round_to_tenth_half_away_from_zero() {
        assert_eq!(round_to_tenth(7.25), 7.3);
        assert_eq!(round_to_tenth(7.24), 7.2);
        assert_eq!(round_to_tenth(5.0), 5.0);
    }

    #[test]
    fn round_to_tenth_uses_stored_value() {
        // 1.45 is stored as 1.4499999999999999556...
        assert_eq!(round_to_tenth(1.45), 1.4);
        assert_eq!(round_to_tenth(0.25), 0.3);
        assert_eq!(round_to_tenth(-7.25), -7.3);
    }

    #[test]
    fn format_amount_small() {
        assert_eq!(format_amount(950.0), "$950");
        assert_eq!(format_amount(12.5), "$12.5");
    }

    #[test]
    fn format_amount_thousands() {
        assert_eq!(format_amount(1_000.0), "$1.0K");
        assert_eq!(format_amount(12_500.0), "$12.5K");
    }

    #[test]
    fn format_amount_millions() {
        assert_eq!(format_amount(1_340_000.0), "$1.3M");
        assert_eq!(format_amount(3_000_000.0), "$3.0M");
    }

    #[test]
    fn score_color_bands() {
        assert_eq!(score_color(0.0), "#ff6b6b");
        assert_eq!(score_color(2.9), "#ff6b6b");
        assert_eq!(score_color(3.0), "#ff8c00");
        assert_eq!(score_color(5.5), "#ffd700");
        assert_eq!(score_color(8.0), "#a8dd00");
        assert_eq!(score_color(9.0), "#00AF4D");
        assert_eq!(score_color(10.0), "#00AF4D");
    }

    #[test]
    fn score_color_out_of_range_is_grey() {
        assert_eq!(score_color(-3.0), "#cccccc");
        assert_eq!(score_color(-0.5), "#cccccc");
        assert_eq!(score_color(10.5), "#00AF4D");
        assert_eq!(score_color(11.0), "#cccccc");
        assert_eq!(score_color(42.0), "#cccccc");
        assert_eq!(score_color(f64::NAN), "#cccccc");
        assert_eq!(score_color(f64::INFINITY), "#cccccc");
    }
}

// ═══════════════════════════════════════════════════════════════════
// PortfolioService
// ═══════════════════════════════════════════════════════════════════

mod portfolio_service {
    use super::*;

    #[test]
    fn add_holding() {
        let svc = PortfolioService::new();
        let mut p = Portfolio::new();
        svc.add_holding(&mut p, holding("AAPL", 100.0, [8.0, 4.0, 9.0])).unwrap();
        assert_eq!(p.holdings.len(), 1);
    }

    #[test]
    fn add_keeps_insertion_order() {
        let svc = PortfolioService::new();
        let mut p = Portfolio::new();
        svc.add_holding(&mut p, holding("TSLA", 1.0, [1.0, 1.0, 1.0])).unwrap();
        svc.add_holding(&mut p, holding("AAPL", 1.0, [1.0, 1.0, 1.0])).unwrap();
        let tickers: Vec<_> = p.holdings.iter().map(|h| h.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["TSLA", "AAPL"]);
    }

    #[test]
    fn duplicate_ticker_rejected() {
        let svc = PortfolioService::new();
        let mut p = Portfolio::new();
        svc.add_holding(&mut p, holding("AAPL", 1.0, [1.0, 1.0, 1.0])).unwrap();
        let err = svc
            .add_holding(&mut p, holding("aapl", 5.0, [2.0, 2.0, 2.0]))
            .unwrap_err();
        assert!(matches!(err, CoreError::DuplicateHolding(ref t) if t == "AAPL"));
        assert_eq!(p.holdings.len(), 1);
    }

    #[test]
    fn blank_ticker_rejected() {
        let svc = PortfolioService::new();
        let mut p = Portfolio::new();
        let err = svc.add_holding(&mut p, unchecked("  ", 1.0)).unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
    }

    #[test]
    fn negative_amount_rejected() {
        let svc = PortfolioService::new();
        let mut p = Portfolio::new();
        let err = svc
            .add_holding(&mut p, unchecked("X", -1.0))
            .unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
        assert!(p.holdings.is_empty());
    }

    #[test]
    fn remove_holding_case_insensitive() {
        let svc = PortfolioService::new();
        let mut p = Portfolio::new();
        svc.add_holding(&mut p, holding("AAPL", 1.0, [1.0, 1.0, 1.0])).unwrap();
        let removed = svc.remove_holding(&mut p, "aapl").unwrap();
        assert_eq!(removed.ticker, "AAPL");
        assert!(p.holdings.is_empty());
    }

    #[test]
    fn remove_unknown_fails() {
        let svc = PortfolioService::new();
        let mut p = Portfolio::new();
        let err = svc.remove_holding(&mut p, "NOPE").unwrap_err();
        assert!(matches!(err, CoreError::HoldingNotFound(ref t) if t == "NOPE"));
    }

    #[test]
    fn remove_twice_fails() {
        let svc = PortfolioService::new();
        let mut p = Portfolio::new();
        svc.add_holding(&mut p, holding("AAPL", 1.0, [1.0, 1.0, 1.0])).unwrap();
        svc.remove_holding(&mut p, "AAPL").unwrap();
        assert!(svc.remove_holding(&mut p, "AAPL").is_err());
    }

    #[test]
    fn set_amount_updates_weight() {
        let svc = PortfolioService::new();
        let mut p = Portfolio::new();
        svc.add_holding(&mut p, holding("AAPL", 1.0, [1.0, 1.0, 1.0])).unwrap();
        svc.set_amount(&mut p, "AAPL", 2500.0).unwrap();
        assert_eq!(svc.get_holding(&p, "AAPL").unwrap().amount_invested, 2500.0);
    }

    #[test]
    fn set_amount_requires_positive() {
        let svc = PortfolioService::new();
        let mut p = Portfolio::new();
        svc.add_holding(&mut p, holding("AAPL", 1.0, [1.0, 1.0, 1.0])).unwrap();
        assert!(svc.set_amount(&mut p, "AAPL", 0.0).is_err());
        assert!(svc.set_amount(&mut p, "AAPL", -10.0).is_err());
        assert!(svc.set_amount(&mut p, "AAPL", f64::INFINITY).is_err());
        assert_eq!(p.holdings[0].amount_invested, 1.0);
    }

    #[test]
    fn set_amount_unknown_ticker_fails() {
        let svc = PortfolioService::new();
        let mut p = Portfolio::new();
        let err = svc.set_amount(&mut p, "X", 10.0).unwrap_err();
        assert!(matches!(err, CoreError::HoldingNotFound(_)));
    }

    #[test]
    fn get_holding_missing_is_none() {
        let svc = PortfolioService::new();
        assert!(svc.get_holding(&Portfolio::new(), "AAPL").is_none());
    }
}

// ═══════════════════════════════════════════════════════════════════
// EsgPortfolio facade
// ═══════════════════════════════════════════════════════════════════

mod facade {
    use super::*;

    #[test]
    fn new_portfolio_has_no_scores() {
        let p = EsgPortfolio::create_new();
        assert_eq!(p.holding_count(), 0);
        assert_eq!(p.overall_score(), 0.0);
        assert_eq!(format_score(p.overall_score()), "-");
    }

    #[test]
    fn scores_follow_mutations() {
        let mut p = EsgPortfolio::create_new();
        p.add_holding(holding("A", 300.0, [10.0, 10.0, 10.0])).unwrap();
        assert_eq!(p.overall_score(), 10.0);

        p.add_holding(holding("B", 100.0, [0.0, 0.0, 0.0])).unwrap();
        assert_eq!(p.overall_score(), 7.5);

        p.set_amount("B", 300.0).unwrap();
        assert_eq!(p.overall_score(), 5.0);
        assert_eq!(p.category_scores().social, 5.0);

        p.remove_holding("A").unwrap();
        assert_eq!(p.overall_score(), 0.0);
        assert_eq!(p.scores().category_scores.environmental, 0.0);
    }

    #[test]
    fn add_raw_uses_configured_weighting() {
        let mut p = EsgPortfolio::create_new();
        let sample = raw("AAPL", None, Some(150.0), &["8/10", "4/10", "9/10"]);

        assert!(p.add_raw_holding(sample.clone()).is_err());

        p.set_weighting(WeightingPolicy::FallbackToPrice);
        p.add_raw_holding(sample).unwrap();
        p.add_raw_holding(raw("TSLA", None, Some(700.0), &["7/10", "5/10", "2/10"]))
            .unwrap();

        assert_eq!(p.total_invested(), 850.0);
        assert_eq!(p.overall_score(), 5.1);
        assert_eq!(p.get_holding("tsla").unwrap().amount_invested, 700.0);
    }

    #[test]
    fn json_roundtrip_preserves_holdings_and_settings() {
        let mut p = EsgPortfolio::create_new();
        p.set_weighting(WeightingPolicy::FallbackToPrice);
        p.set_api_key("alphavantage".into(), "demo".into());
        p.add_holding(holding("A", 120.0, [3.0, 7.0, 1.0]).named("Alpha")).unwrap();

        let json = p.to_json().unwrap();
        let back = EsgPortfolio::from_json(&json).unwrap();

        assert_eq!(back.portfolio(), p.portfolio());
        assert_eq!(back.scores(), p.scores());
    }

    #[test]
    fn from_json_rejects_garbage() {
        let err = EsgPortfolio::from_json("not json").unwrap_err();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn from_json_rejects_negative_amount() {
        let json = r#"{"holdings": [
            {"ticker": "A", "amountInvested": -100, "scores": [10, 10, 10]},
            {"ticker": "B", "amountInvested": 200, "scores": [0, 0, 0]}
        ]}"#;
        let err = EsgPortfolio::from_json(json).unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
    }

    #[test]
    fn from_json_rejects_duplicate_tickers() {
        let json = r#"{"holdings": [
            {"ticker": "msft", "amountInvested": 10, "scores": [1, 2, 3]},
            {"ticker": "MSFT", "amountInvested": 20, "scores": [4, 5, 6]}
        ]}"#;
        let err = EsgPortfolio::from_json(json).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateHolding(t) if t == "MSFT"));
    }

    #[test]
    fn from_json_normalises_tickers() {
        let json = r#"{"holdings": [
            {"ticker": " aapl ", "name": "Apple", "amountInvested": 50, "scores": [8, null, 4]}
        ]}"#;
        let p = EsgPortfolio::from_json(json).unwrap();
        let h = p.get_holding("AAPL").unwrap();
        assert_eq!(h.ticker, "AAPL");
        assert_eq!(h.name.as_deref(), Some("Apple"));
        assert!(h.score(Category::Social).is_none());
    }

    #[test]
    fn api_keys_can_be_removed() {
        let mut p = EsgPortfolio::create_new();
        p.set_api_key("alphavantage".into(), "k".into());
        assert!(p.remove_api_key("alphavantage"));
        assert!(!p.remove_api_key("alphavantage"));
        assert!(p.settings().api_keys.is_empty());
    }

    #[test]
    fn from_portfolio_wraps_value() {
        let portfolio = Portfolio::with_holdings(vec![holding("A", 100.0, [8.0, 6.0, 4.0])]);
        let p = EsgPortfolio::from_portfolio(portfolio.clone());
        assert_eq!(p.overall_score(), 6.0);
        assert_eq!(p.into_portfolio(), portfolio);
    }
}
