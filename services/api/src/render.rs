use outfit_recommender::domain::{Outfit, RankedResult};
use outfit_recommender::ranking::RankRequest;
use outfit_recommender::scoring::ScoreReport;

pub(crate) fn render_recommendations(
    request: &RankRequest,
    policy: &str,
    candidates: usize,
    results: &[RankedResult],
) {
    println!("Outfit recommendations ({policy} policy)");
    println!(
        "Style {} | Body shape {} | Season {} | Occasion {}",
        request.style,
        request.body_shape,
        request.season.as_deref().unwrap_or("-"),
        request.occasion.as_deref().unwrap_or("-")
    );
    if !request.features.is_empty() {
        let features: Vec<String> = request
            .features
            .iter()
            .map(|(kind, value)| format!("{kind}={value}"))
            .collect();
        println!("Requested features: {}", features.join(", "));
    }

    if results.is_empty() {
        println!("\nNo outfits matched ({candidates} candidates considered)");
        return;
    }

    println!("\nTop {} of {} candidates", results.len(), candidates);
    for (position, result) in results.iter().enumerate() {
        println!(
            "{}. {} (score {:.2})",
            position + 1,
            result.outfit.image_label,
            result.combined_score
        );
        println!(
            "   style {:.2} | body shape {:.2} | season {:.2} | occasion {:.2} | features {:.2}",
            result.style_score,
            result.bodyshape_score,
            result.season_score,
            result.occasion_score,
            result.feature_bonus
        );
        if !result.outfit.image_url.is_empty() {
            println!("   {}", result.outfit.image_url);
        }
    }
}

pub(crate) fn render_score_report(outfit: &Outfit, report: &ScoreReport) {
    println!("Outfit attributes");
    for (attribute, value) in &outfit.attributes {
        println!("- {attribute}: {value}");
    }

    println!("\nCategory totals");
    for (category, total) in &report.totals {
        println!("- {category}: {total:.2}");
        if let Some(breakdown) = report.breakdowns.get(category) {
            for (attribute, contribution) in breakdown {
                println!("    {attribute}: {contribution:.2}");
            }
        }
    }
}
