// src/render.rs
//! Plain-text views of layouts, guideline lists, details and decision
//! sessions.

use mht_core::display::format_last_updated;
use mht_core::{CategoryCounts, CategoryKey, GuidelineRecord, Severity};
use mht_layout::{GridCell, GridRow, LayoutState, PaneFrame, PaneLayout, TextVariant};
use mht_runtime::{BookmarkSet, DecisionOutcome, DecisionSession};

pub const EMPTY_LIST_MESSAGE: &str = "No guidelines match the current filters.";
pub const NO_BOOKMARKS_MESSAGE: &str = "No bookmarked guidelines yet.";

fn tree_prefix(is_last: bool) -> &'static str {
    if is_last {
        "└── "
    } else {
        "├── "
    }
}

fn frame_text(frame: &PaneFrame) -> String {
    format!(
        "pos:({:.0},{:.0}) size:({:.0},{:.0})",
        frame.position.x, frame.position.y, frame.size.x, frame.size.y
    )
}

pub fn layout_report(state: &LayoutState, panes: &PaneLayout) -> String {
    let device = &state.device;
    let mut output = String::new();

    output.push_str(&format!(
        "Screen {:.0}x{:.0} {}\n",
        device.metrics.width,
        device.metrics.height,
        device.orientation.name()
    ));
    output.push_str(&format!("Device: {}\n", device.class.name()));
    output.push_str(&format!(
        "Spacing: {:.1}  Touch target: {:.0}  Columns: {}  Title size: {:.1}\n",
        state.spacing,
        state.touch_target,
        state.columns,
        TextVariant::H1.size_for(device.class)
    ));
    output.push_str(&format!(
        "Layout: {}  Content width: {:.1}\n",
        if state.show_multi_pane { "multi-pane" } else { "single-pane" },
        panes.content_width
    ));

    let mut frames = Vec::with_capacity(3);
    if let Some(left) = &panes.left {
        frames.push(("List", left));
    }
    frames.push(("Main", &panes.main));
    if let Some(right) = &panes.right {
        frames.push(("Detail", right));
    }

    let count = frames.len();
    for (i, (name, frame)) in frames.into_iter().enumerate() {
        output.push_str(&format!("{}{} {}\n", tree_prefix(i + 1 == count), name, frame_text(frame)));
    }
    output
}

pub fn category_bar(counts: &CategoryCounts, active: CategoryKey) -> String {
    let chips: Vec<String> = CategoryKey::ALL
        .iter()
        .map(|key| {
            let chip = format!("{} {}", key.label(), counts.get(*key));
            if *key == active {
                format!("[{chip}]")
            } else {
                chip
            }
        })
        .collect();
    format!("{}\n", chips.join(" | "))
}

fn record_cell(record: &GuidelineRecord, bookmarks: &BookmarkSet) -> String {
    let mark = if bookmarks.contains(&record.id) { "* " } else { "" };
    format!("{}{} ({}, {})", mark, record.title, record.id, record.priority.label())
}

/// One line per grid row; placeholder cells render as `-`. With no rows
/// the `empty` message is shown instead.
pub fn guideline_grid(
    rows: &[GridRow<&GuidelineRecord>],
    bookmarks: &BookmarkSet,
    empty: &str,
) -> String {
    if rows.is_empty() {
        return format!("{empty}\n");
    }

    let mut output = String::new();
    for (i, row) in rows.iter().enumerate() {
        let cells: Vec<String> = row
            .cells
            .iter()
            .map(|cell| match cell {
                GridCell::Item(record) => record_cell(record, bookmarks),
                GridCell::Placeholder => "-".to_string(),
            })
            .collect();
        output.push_str(tree_prefix(i + 1 == rows.len()));
        output.push_str(&cells.join(" | "));
        output.push('\n');
    }
    output
}

pub fn guideline_detail(record: &GuidelineRecord, bookmarked: bool) -> String {
    let content = &record.content;
    let mut output = String::new();

    output.push_str(&format!("{}{}\n", record.title, if bookmarked { " *" } else { "" }));
    output.push_str(&format!(
        "id: {}  category: {}  priority: {}\n",
        record.id,
        record.category.label(),
        record.priority.label()
    ));
    output.push_str(&format!("Last updated: {}\n", format_last_updated(&record.last_updated)));

    output.push_str("\nOverview\n");
    output.push_str(&format!("  {}\n", content.overview));

    push_list(&mut output, "Key points", &content.key_points);

    if !content.recommendations.is_empty() {
        output.push_str("\nRecommendations\n");
        for (i, recommendation) in content.recommendations.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, recommendation.text));
            output.push_str(&format!(
                "     Grade: {}  Evidence: {}\n",
                recommendation.grade.label(),
                recommendation.evidence_level.label()
            ));
            for reference in &recommendation.references {
                output.push_str(&format!(
                    "     - {} ({}) [{}]\n",
                    reference.source,
                    reference.year,
                    reference.level.label()
                ));
            }
        }
    }

    push_list(&mut output, "Clinical pearls", &content.clinical_pearls);
    push_list(&mut output, "Warnings", &content.warnings);
    push_list(&mut output, "Patient counseling", &content.patient_counseling);

    if let Some(card) = &record.quick_reference {
        output.push_str(&format!("\nQuick reference: {}\n", card.title));
        for item in &card.items {
            let marker = match (item.highlight, item.severity) {
                (_, Severity::Danger) => "!! ",
                (_, Severity::Warning) => "! ",
                (true, Severity::Info) => "> ",
                (false, Severity::Info) => "",
            };
            output.push_str(&format!("  {}{}: {}\n", marker, item.label, item.value));
        }
    }

    if let Some(entry) = &record.decision_tree {
        output.push_str(&format!("\nDecision tree: {}/{}\n", entry.tree, entry.root));
    }
    output
}

fn push_list(output: &mut String, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    output.push_str(&format!("\n{heading}\n"));
    for item in items {
        output.push_str(&format!("  - {item}\n"));
    }
}

pub fn outcome_view(outcome: &DecisionOutcome) -> String {
    match outcome.risk_tier {
        Some(tier) => format!("Outcome ({} risk): {}\n", tier.label(), outcome.text),
        None => format!("Outcome: {}\n", outcome.text),
    }
}

pub fn session_view(session: &DecisionSession<'_>) -> String {
    let node = session.current();
    let mut output = String::new();

    output.push_str(&format!("Node: {}/{}\n", session.current_tree(), node.id));
    if session.path().is_empty() {
        output.push_str("Path: (start)\n");
    } else {
        output.push_str(&format!("Path: {}\n", session.path().join(" > ")));
    }
    if !node.question.is_empty() {
        output.push_str(&format!("Question: {}\n", node.question));
    }
    if let Some(outcome) = &node.outcome {
        output.push_str(&format!("Result: {outcome}\n"));
    }
    if let Some(recommendation) = &node.recommendation {
        output.push_str(&format!("Recommendation: {recommendation}\n"));
    }

    if let Some(outcome) = session.pending_outcome() {
        output.push_str(&outcome_view(outcome));
        output.push_str("Start over or acknowledge to continue.\n");
    } else if node.options.is_empty() {
        output.push_str("End of decision tree.\n");
    } else {
        for (i, option) in node.options.iter().enumerate() {
            output.push_str(&format!(
                "{}{}. {}\n",
                tree_prefix(i + 1 == node.options.len()),
                i + 1,
                option.text()
            ));
        }
    }
    output
}
