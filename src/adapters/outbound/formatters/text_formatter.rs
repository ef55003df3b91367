use crate::ports::outbound::ResultFormatter;
use crate::scan_submission::domain::{
    parse_percentage, AnalysisSnapshot, AssistantReply, CanonicalResult, DashboardSnapshot,
    DataSource, EnsembleModel, RecentActivity, ScanStatus, ThreatSeverity,
    CONFIDENCE_NOT_AVAILABLE,
};
use crate::shared::Result;
use chrono::{DateTime, Utc};
use owo_colors::OwoColorize;
use std::fmt::Write;

/// Width of a confidence bar in characters
const BAR_WIDTH: usize = 20;

/// Importance (in percent) that fills a feature bar
const FEATURE_BAR_SCALE: f64 = 20.0;

/// TextFormatter adapter rendering a colored terminal report
pub struct TextFormatter;

impl TextFormatter {
    pub fn new() -> Self {
        Self
    }

    /// `████░░░░` bar for a percentage string; unparsable values draw empty.
    fn confidence_bar(value: &str) -> String {
        Self::bar(parse_percentage(value))
    }

    fn bar(percent: f64) -> String {
        let percent = if percent.is_finite() {
            percent.clamp(0.0, 100.0)
        } else {
            0.0
        };
        let filled = ((percent / 100.0) * BAR_WIDTH as f64).round() as usize;
        format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
    }

    /// Unrecognized verdicts are shown as the service labelled them
    fn verdict(result: &CanonicalResult) -> String {
        match result.status {
            ScanStatus::Malicious => format!("{}", "🦠 MALICIOUS".red().bold()),
            ScanStatus::Benign => format!("{}", "✅ BENIGN".green().bold()),
            ScanStatus::Unknown => format!("{}", format!("❔ {}", result.status_label).dimmed()),
        }
    }

    fn threat(result: &CanonicalResult) -> String {
        let label = result.threat_level.label();
        match result.threat_level.severity() {
            ThreatSeverity::Critical | ThreatSeverity::High => format!("{}", label.red()),
            ThreatSeverity::Medium => format!("{}", label.yellow()),
            ThreatSeverity::Low => format!("{}", label.bright_yellow()),
            ThreatSeverity::Minimal => format!("{}", label.green()),
            ThreatSeverity::Unknown => format!("{}", label.dimmed()),
        }
    }

    fn source_label(source: DataSource) -> String {
        match source {
            DataSource::Live => "live".to_string(),
            DataSource::Demo => format!("{}", "demo data - backend not available".yellow()),
        }
    }

    fn recent_line(activity: &RecentActivity, now: DateTime<Utc>) -> String {
        let name = if activity.filename.is_empty() {
            "Unknown file"
        } else {
            activity.filename.as_str()
        };
        format!(
            "  {:<28} {:<10} {:>7}  {}",
            name,
            activity.status,
            activity.confidence,
            format_relative(activity.date, now)
        )
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders an HTML fragment as plain text: `<br>` and block ends become
/// line breaks, other tags are dropped and common entities decoded.
pub fn html_to_text(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(start) = rest.find('<') {
        text.push_str(&rest[..start]);
        let Some(end) = rest[start..].find('>') else {
            text.push_str(&rest[start..]);
            rest = "";
            break;
        };
        let tag = rest[start + 1..start + end].trim().to_ascii_lowercase();
        let name = tag.trim_start_matches('/').split_whitespace().next().unwrap_or("");
        if matches!(name, "br" | "br/" | "p" | "div" | "li" | "tr" | "h1" | "h2" | "h3" | "h4")
            && (tag.starts_with('/') || name.starts_with("br"))
        {
            text.push('\n');
        }
        rest = &rest[start + end + 1..];
    }
    text.push_str(rest);

    let decoded = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");

    decoded
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// "Just now", "5 minutes ago", "3 hours ago", "2 days ago", or the date.
pub fn format_relative(date: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(date) = date else {
        return "Unknown".to_string();
    };
    let elapsed = now.signed_duration_since(date);
    let plural = |n: i64| if n == 1 { "" } else { "s" };

    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();
    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{} minute{} ago", minutes, plural(minutes))
    } else if hours < 24 {
        format!("{} hour{} ago", hours, plural(hours))
    } else if days < 7 {
        format!("{} day{} ago", days, plural(days))
    } else {
        date.format("%Y-%m-%d").to_string()
    }
}

impl ResultFormatter for TextFormatter {
    fn format_result(&self, result: &CanonicalResult) -> Result<String> {
        let mut out = String::new();
        writeln!(
            out,
            "📄 {} ({} KB, {})",
            result.file.name.bold(),
            result.file.size_kb(),
            result.file.file_type
        )?;
        writeln!(out)?;
        writeln!(out, "   Verdict:       {}", Self::verdict(result))?;
        writeln!(out, "   Threat level:  {}", Self::threat(result))?;
        writeln!(
            out,
            "   Confidence:    {:>7}  {}",
            result.confidence,
            Self::confidence_bar(&result.confidence)
        )?;

        let reported: Vec<(EnsembleModel, &str)> = EnsembleModel::ALL
            .iter()
            .map(|model| (*model, result.model_confidence(*model)))
            .filter(|(_, value)| *value != CONFIDENCE_NOT_AVAILABLE)
            .collect();
        if !reported.is_empty() {
            writeln!(out)?;
            writeln!(out, "   Individual model confidences:")?;
            for (model, value) in reported {
                writeln!(
                    out,
                    "     {:<15} {:>7}  {}",
                    model.display_name(),
                    value,
                    Self::confidence_bar(value)
                )?;
            }
        }

        let details = html_to_text(&result.details);
        if !details.is_empty() {
            writeln!(out)?;
            writeln!(out, "   Details:")?;
            for line in details.lines() {
                writeln!(out, "     {}", line)?;
            }
        }
        Ok(out)
    }

    fn format_dashboard(&self, snapshot: &DashboardSnapshot) -> Result<String> {
        let stats = &snapshot.stats;
        let mut out = String::new();
        writeln!(
            out,
            "📊 {} ({})",
            "Dashboard".bold(),
            Self::source_label(snapshot.source)
        )?;
        writeln!(out)?;
        writeln!(out, "   Total scans:      {}", stats.total_scans)?;
        writeln!(
            out,
            "   Malicious:        {} ({:.1}%)",
            stats.malicious_count.red(),
            stats.malicious_rate()
        )?;
        writeln!(out, "   Benign:           {}", stats.benign_count.green())?;
        writeln!(out, "   Today:            {}", stats.todays_scans)?;
        writeln!(out, "   False positives:  {}", stats.false_positives)?;
        writeln!(out, "   False negatives:  {}", stats.false_negatives)?;
        writeln!(out)?;
        writeln!(out, "   Recent activity:")?;

        if snapshot.recent.is_empty() {
            writeln!(out, "  No recent activity")?;
        } else {
            let now = Utc::now();
            for activity in &snapshot.recent {
                writeln!(out, "{}", Self::recent_line(activity, now))?;
            }
        }
        Ok(out)
    }

    fn format_analysis(&self, snapshot: &AnalysisSnapshot) -> Result<String> {
        let report = &snapshot.report;
        let mut out = String::new();
        writeln!(
            out,
            "🔬 {} ({})",
            "Model Analysis".bold(),
            Self::source_label(snapshot.source)
        )?;
        writeln!(out)?;
        writeln!(out, "   Confusion matrix:     predicted benign  predicted malicious")?;
        writeln!(
            out,
            "     actual benign      {:>16}  {:>19}",
            report.true_negatives().green(),
            report.false_positives().yellow()
        )?;
        writeln!(
            out,
            "     actual malicious   {:>16}  {:>19}",
            report.false_negatives().yellow(),
            report.true_positives().green()
        )?;
        writeln!(out, "   Matrix accuracy:  {:.2}%", report.matrix_accuracy())?;

        if !report.model_accuracies.is_empty() {
            writeln!(out)?;
            writeln!(out, "   Model accuracies:")?;
            for (model, accuracy) in &report.model_accuracies {
                let percent = accuracy * 100.0;
                writeln!(
                    out,
                    "     {:<15} {:>7.2}%  {}",
                    model,
                    percent,
                    Self::bar(percent)
                )?;
            }
        }

        let features = report.top_features();
        if !features.is_empty() {
            writeln!(out)?;
            writeln!(out, "   Top {} feature importance:", features.len())?;
            for feature in features {
                let percent = feature.importance * 100.0;
                writeln!(
                    out,
                    "     {:<15} {:>6.1}%  {}",
                    feature.name,
                    percent,
                    Self::bar(percent * 100.0 / FEATURE_BAR_SCALE)
                )?;
            }
        }

        writeln!(out)?;
        writeln!(
            out,
            "   ROC curve:        AUC = {:.4} ({} points)",
            report.roc.auc,
            report.roc.points().count()
        )?;
        if let Some(path) = report.image_path() {
            writeln!(out, "   Evaluation image: {}", path)?;
        }
        Ok(out)
    }

    fn format_reply(&self, reply: &AssistantReply) -> Result<String> {
        let text = reply.text();
        if text.trim().is_empty() {
            return Ok(format!("🤖 {}\n", "(empty reply)".dimmed()));
        }
        Ok(format!("🤖 {}\n", text.trim_end()))
    }
}
