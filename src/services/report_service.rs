use chrono::Utc;

use crate::models::{ActionPriority, PriceAction, ProductInsight, Urgency, WeeklyActionPlan};

const LOW_CONFIDENCE_THRESHOLD: f64 = 60.0;
// Risk lines only appear once the problem is widespread enough to lead a
// weekly conversation.
const STOCKOUT_RISK_MIN: usize = 3;
const ANOMALY_RISK_MIN: usize = 2;

/// Assemble a deterministic weekly action plan from product insights.
pub fn build_weekly_plan(products: &[ProductInsight]) -> WeeklyActionPlan {
    let high_urgency: Vec<&ProductInsight> = products
        .iter()
        .filter(|p| p.reorder.urgency == Urgency::High)
        .collect();
    let anomaly_products: Vec<&ProductInsight> =
        products.iter().filter(|p| !p.anomalies.is_empty()).collect();
    let low_confidence: Vec<&ProductInsight> = products
        .iter()
        .filter(|p| p.confidence_score < LOW_CONFIDENCE_THRESHOLD)
        .collect();
    let price_opportunities: Vec<&ProductInsight> = products
        .iter()
        .filter(|p| matches!(&p.price_hint, Some(hint) if hint.action != PriceAction::Hold))
        .collect();

    let mut priorities = Vec::new();
    if !high_urgency.is_empty() {
        priorities.push(ActionPriority {
            title: "High priority reorders".to_string(),
            description: format!(
                "{} products need urgent reordering: {}",
                high_urgency.len(),
                name_list(&high_urgency)
            ),
            impact: "Prevent stockouts and maintain sales".to_string(),
        });
    }
    if !anomaly_products.is_empty() {
        priorities.push(ActionPriority {
            title: "Address demand anomalies".to_string(),
            description: format!(
                "{} products showing unusual patterns: {}",
                anomaly_products.len(),
                name_list(&anomaly_products)
            ),
            impact: "Adjust inventory and pricing strategy".to_string(),
        });
    }
    if !price_opportunities.is_empty() {
        priorities.push(ActionPriority {
            title: "Price optimization".to_string(),
            description: format!(
                "{} products have pricing opportunities",
                price_opportunities.len()
            ),
            impact: "Increase revenue through strategic pricing".to_string(),
        });
    }

    let mut risks = Vec::new();
    if high_urgency.len() > STOCKOUT_RISK_MIN {
        risks.push(format!(
            "{} products at risk of stockout",
            high_urgency.len()
        ));
    }
    if anomaly_products.len() > ANOMALY_RISK_MIN {
        risks.push(format!(
            "{} products with unusual demand patterns",
            anomaly_products.len()
        ));
    }
    if !low_confidence.is_empty() {
        risks.push(format!(
            "{} products with low forecast confidence",
            low_confidence.len()
        ));
    }

    let mut quick_wins = Vec::new();
    if let Some(product) = high_urgency.first() {
        quick_wins.push(format!("Order {} immediately", product.product_name));
    }
    if let Some(product) = price_opportunities.first() {
        quick_wins.push(format!("Adjust price for {}", product.product_name));
    }
    quick_wins.push("Review low-confidence items for data quality".to_string());

    WeeklyActionPlan {
        priorities,
        risks,
        quick_wins,
        generated_at: Utc::now(),
    }
}

fn name_list(products: &[&ProductInsight]) -> String {
    products
        .iter()
        .take(3)
        .map(|p| p.product_name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Anomaly, AnomalyKind, PriceHint, ReorderDecision, Severity};

    fn insight(name: &str, urgency: Urgency, confidence: f64) -> ProductInsight {
        ProductInsight {
            product_name: name.to_string(),
            forecast: Vec::new(),
            forecast_30d: Vec::new(),
            confidence_score: confidence,
            anomalies: Vec::new(),
            reorder: ReorderDecision {
                quantity: 10.0,
                urgency,
            },
            price_hint: None,
            demand_reasoning: String::new(),
        }
    }

    fn with_anomaly(mut insight: ProductInsight) -> ProductInsight {
        insight.anomalies.push(Anomaly {
            kind: AnomalyKind::Spike,
            severity: Severity::High,
            change_percent: Some(80.0),
            z_score: None,
            current_velocity: None,
            average_velocity: None,
            description: "Sales up 80.00% week-over-week".to_string(),
        });
        insight
    }

    fn with_discount(mut insight: ProductInsight) -> ProductInsight {
        insight.price_hint = Some(PriceHint {
            action: PriceAction::Discount,
            suggested_delta: 5.0,
            reason: "Demand trending down (WoW < -20%)".to_string(),
        });
        insight
    }

    #[test]
    fn test_quiet_week_has_no_priorities() {
        let products = vec![insight("Tea", Urgency::Low, 90.0)];
        let plan = build_weekly_plan(&products);

        assert!(plan.priorities.is_empty());
        assert!(plan.risks.is_empty());
        // Data-quality review is always worth a look.
        assert_eq!(plan.quick_wins.len(), 1);
    }

    #[test]
    fn test_urgent_reorders_lead_the_plan() {
        let products = vec![
            insight("Tea", Urgency::High, 90.0),
            insight("Rice", Urgency::Low, 90.0),
        ];
        let plan = build_weekly_plan(&products);

        assert_eq!(plan.priorities[0].title, "High priority reorders");
        assert!(plan.priorities[0].description.contains("Tea"));
        assert!(plan.quick_wins[0].contains("Order Tea immediately"));
    }

    #[test]
    fn test_risks_require_thresholds() {
        // Three high-urgency products sit at the threshold, so no stockout
        // risk line yet; a fourth tips it over.
        let mut products: Vec<ProductInsight> = (0..3)
            .map(|i| insight(&format!("P{}", i), Urgency::High, 90.0))
            .collect();
        assert!(build_weekly_plan(&products)
            .risks
            .iter()
            .all(|r| !r.contains("stockout")));

        products.push(insight("P3", Urgency::High, 90.0));
        assert!(build_weekly_plan(&products)
            .risks
            .iter()
            .any(|r| r.contains("stockout")));
    }

    #[test]
    fn test_low_confidence_is_always_a_risk() {
        let products = vec![insight("Tea", Urgency::Low, 45.0)];
        let plan = build_weekly_plan(&products);
        assert!(plan
            .risks
            .iter()
            .any(|r| r.contains("low forecast confidence")));
    }

    #[test]
    fn test_price_opportunities_and_anomalies() {
        let products = vec![
            with_discount(insight("Tea", Urgency::Low, 90.0)),
            with_anomaly(insight("Rice", Urgency::Low, 90.0)),
        ];
        let plan = build_weekly_plan(&products);

        assert!(plan
            .priorities
            .iter()
            .any(|p| p.title == "Address demand anomalies"));
        assert!(plan.priorities.iter().any(|p| p.title == "Price optimization"));
        assert!(plan.quick_wins.iter().any(|w| w.contains("Adjust price for Tea")));
    }
}
