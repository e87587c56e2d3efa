pub mod utils;

use crate::ui::utils::hex_to_rgb;
use crossterm::style::{Color, Stylize};
use textwrap::Options;
use wordwhittler::check::{Category, Diagnostic};
use wordwhittler::config::Theme;
use wordwhittler::metrics;
use wordwhittler::tree::LookupTree;

const W_LABEL: usize = 30;

pub fn print_tree(tree: &LookupTree, theme: &Theme) {
    if tree.is_empty() {
        println!("\n  No entries.\n");
        return;
    }

    let heading = hex_to_rgb(&theme.heading);
    println!();
    for node in &tree.entries {
        println!(
            "  {} {}",
            node.lemma.as_str().with(heading).bold(),
            format!("({})", node.pos).dim()
        );
        for group in &node.groups {
            println!("    {}", group.kind.label().with(heading));
            for word in &group.targets {
                println!("      {}", word.lemma);
            }
        }
    }
    println!();
}

/// Two-column table; negative counters are shown in the danger color.
pub fn print_rows(rows: &[(&str, String)], theme: &Theme) {
    let danger = hex_to_rgb(&theme.danger);
    for (label, value) in rows {
        print!("  {:<lw$}", label, lw = W_LABEL);
        if metrics::is_danger(value) {
            println!("{}", value.as_str().with(danger));
        } else {
            println!("{}", value);
        }
    }
}

pub fn print_wrapped(text: &str, width: usize) {
    let options = Options::new(width.saturating_sub(2))
        .initial_indent("  ")
        .subsequent_indent("    ");
    for line in text.lines() {
        if line.is_empty() {
            println!();
            continue;
        }
        for wrapped in textwrap::wrap(line, options.clone()) {
            println!("{}", wrapped);
        }
    }
}

pub fn print_diagnostics(text: &str, diagnostics: &[Diagnostic], theme: &Theme) {
    if diagnostics.is_empty() {
        println!("\n  No problems found.\n");
        return;
    }
    println!();
    for d in diagnostics {
        println!(
            "  {:>5}..{:<5} {}",
            d.start,
            d.end,
            d.list_label(text).with(category_color(d.category, theme))
        );
    }
    println!();
}

pub fn print_error(message: &str, theme: &Theme) {
    eprintln!("  {}", message.with(hex_to_rgb(&theme.danger)));
}

fn category_color(category: Category, theme: &Theme) -> Color {
    match category {
        Category::Hint => hex_to_rgb(&theme.hint),
        Category::UnknownWord => hex_to_rgb(&theme.unknown_word),
        Category::Other => hex_to_rgb(&theme.other),
    }
}
