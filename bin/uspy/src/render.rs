//! Plain text rendering of the subject page.

use std::fmt::Write;

use uspy_view::{
    ChartPanel, GraphPanel, PageBody, SubjectPage,
    messages::WORTH_IT_QUESTION,
    page::{EvaluationCard, GradeChart},
    routes::Breadcrumb,
};

const BAR_WIDTH: u32 = 30;

pub fn page(breadcrumbs: &[Breadcrumb], body: &PageBody) -> String {
    let mut out = String::new();

    let trail: Vec<&str> = breadcrumbs.iter().map(|b| b.text.as_str()).collect();
    let _ = writeln!(out, "{}\n", trail.join(" > "));

    match body {
        PageBody::Loading => out.push_str("Carregando...\n"),
        PageBody::Message(message) => {
            let _ = writeln!(out, "{message}");
        }
        PageBody::Content(page) => subject(&mut out, page),
    }

    out
}

fn subject(out: &mut String, page: &SubjectPage) {
    let _ = writeln!(out, "{}", page.title);
    if !page.description.is_empty() {
        let _ = writeln!(out, "\n{}", page.description);
    }
    out.push('\n');

    let credits: Vec<String> = page
        .credits
        .iter()
        .map(|c| format!("{}: {}", c.title, c.value))
        .collect();
    let _ = writeln!(out, "{}", credits.join("  "));
    for line in &page.info {
        let _ = writeln!(out, "{}: {}", line.label, line.value);
    }

    out.push('\n');
    evaluation(out, &page.evaluation);

    let _ = writeln!(out, "\nDistribuição de Notas");
    chart(out, &page.chart);

    let _ = writeln!(out, "\nRequisitos e Trancamentos");
    graph(out, &page.graph);
}

fn evaluation(out: &mut String, card: &EvaluationCard) {
    let _ = writeln!(out, "{}", card.header);
    if card.can_evaluate {
        let chosen = card
            .chosen
            .map_or_else(|| "-".to_string(), |choice| choice.to_string());
        let _ = writeln!(out, "{WORTH_IT_QUESTION} [{chosen}]");
    }
    let _ = writeln!(out, "{}", card.recommendation);
    let _ = writeln!(out, "{}", card.total);
}

fn chart(out: &mut String, panel: &ChartPanel) {
    match panel {
        ChartPanel::Loading => out.push_str("Carregando...\n"),
        ChartPanel::NotEnoughData { message } => {
            let _ = writeln!(out, "{message}");
        }
        ChartPanel::LoginPrompt {
            message,
            action_title,
            redirect,
        } => {
            let _ = writeln!(out, "{message}");
            let _ = writeln!(out, "[{action_title}] {}", redirect.href());
        }
        ChartPanel::Chart(chart) => histogram(out, chart),
    }
}

fn histogram(out: &mut String, chart: &GradeChart) {
    let max = chart.bars.iter().map(|b| b.count).max().unwrap_or(0).max(1);

    for bar in &chart.bars {
        let width = bar.count.saturating_mul(BAR_WIDTH) / max;
        let _ = writeln!(
            out,
            "{:>5} | {} {}",
            bar.grade,
            "#".repeat(width as usize),
            bar.count
        );
    }

    let _ = writeln!(out, "{}", chart.approval_text);
    let _ = writeln!(out, "{}", chart.average_text);
    if let Some(text) = &chart.your_grade_text {
        let _ = writeln!(out, "{text}");
    }
}

fn graph(out: &mut String, panel: &GraphPanel) {
    match panel {
        GraphPanel::Loading => out.push_str("Carregando...\n"),
        GraphPanel::Empty { message } => {
            let _ = writeln!(out, "{message}");
        }
        GraphPanel::Graph(graph) => {
            for edge in graph.edges() {
                let _ = writeln!(out, "{} -> {}", edge.from, edge.to);
            }
        }
    }
}
