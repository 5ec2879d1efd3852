//! Terminal rendering for command output.

use elevenlabs_lib::import::ImportReport;
use elevenlabs_lib::types::{
    HistoryPage, Model, SubscriptionInfo, UserInfo, Voice, VoiceClip,
};
use owo_colors::OwoColorize;

pub fn voice_line(voice: &Voice) -> String {
    let category = voice.category.as_deref().unwrap_or("-");
    let labels = voice
        .labels
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{}  {}  {}  {}",
        voice.voice_id.dimmed(),
        voice.name.bold(),
        category.cyan(),
        labels
    )
}

pub fn voice_detail(voice: &Voice) -> String {
    let mut out = vec![voice_line(voice)];
    if let Some(description) = &voice.description {
        out.push(format!("  {description}"));
    }
    if let Some(settings) = &voice.settings {
        out.push(format!(
            "  stability {:.2}, similarity {:.2}",
            settings.stability, settings.similarity_boost
        ));
    }
    for sample in &voice.samples {
        out.push(format!(
            "  sample {} {}",
            sample.sample_id.dimmed(),
            sample.file_name.as_deref().unwrap_or("")
        ));
    }
    out.join("\n")
}

pub fn model_line(model: &Model) -> String {
    let languages = model
        .languages
        .iter()
        .map(|l| l.language_id.as_str())
        .collect::<Vec<_>>()
        .join(",");
    format!(
        "{}  {}  [{}]",
        model.id().bold(),
        model.name.as_deref().unwrap_or(""),
        languages.dimmed()
    )
}

pub fn subscription(info: &SubscriptionInfo) -> String {
    let reset = info
        .next_character_count_reset()
        .map(|d| d.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "-".to_string());
    let mut lines = vec![
        format!("Tier:        {} ({})", info.tier.bold(), info.status),
        format!(
            "Characters:  {} / {} ({} left)",
            info.character_count,
            info.character_limit,
            info.characters_remaining().green()
        ),
        format!("Resets:      {reset}"),
        format!("Voice limit: {}", info.voice_limit),
    ];
    if let Some(invoice) = &info.next_invoice {
        lines.push(format!(
            "Next invoice: {:.2} {}",
            invoice.amount_due_cents as f64 / 100.0,
            info.currency.as_deref().unwrap_or("")
        ));
    }
    lines.join("\n")
}

pub fn user(info: &UserInfo) -> String {
    let name = info.first_name.as_deref().unwrap_or("(no name)");
    format!("{}\n{}", name.bold(), subscription(&info.subscription))
}

pub fn history(page: &HistoryPage) -> String {
    let mut lines: Vec<String> = page
        .history
        .iter()
        .map(|item| {
            let date = item
                .date()
                .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default();
            format!(
                "{}  {}  {:>5}  {}  {}",
                item.history_item_id.dimmed(),
                date,
                item.character_count(),
                item.voice_name.as_deref().unwrap_or(&item.voice_id).cyan(),
                item.text
            )
        })
        .collect();
    if page.has_more {
        lines.push("(more items available)".dimmed().to_string());
    }
    lines.join("\n")
}

pub fn clip(clip: &VoiceClip) -> String {
    let path = clip
        .cached_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    format!(
        "{} {} ({} bytes) -> {}",
        "saved".green(),
        clip.id.bold(),
        clip.audio.len(),
        path
    )
}

pub fn import_report(report: &ImportReport) -> String {
    let mut lines = vec![format!(
        "{} imported, {} already present, {} failed",
        report.imported.len().green(),
        report.skipped.len(),
        report.failed.len().red()
    )];
    for failure in &report.failed {
        lines.push(format!("  {} {}: {}", "x".red(), failure.clip_id, failure.error));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_line_contains_labels() {
        let mut voice = Voice::new("v1", "Rachel");
        voice.labels.insert("accent".into(), "american".into());
        let line = voice_line(&voice);
        assert!(line.contains("Rachel"));
        assert!(line.contains("accent=american"));
    }

    #[test]
    fn test_import_report_counts() {
        let report = ImportReport::default();
        assert!(import_report(&report).contains("0 already present"));
    }
}
