//! Usage text rendering in one-column and two-column layouts.
//!
//! Headers feed the text above the usage line, notes contribute free text
//! rows and checks render nothing. Children are always listed directly below
//! their parent, whatever their declaration position.

use crate::registry::Registry;
use crate::{Arity, DefKind, Definition, ParserSettings, UsageLayout};

const INDENT: &str = "  ";
const DESCRIPTION_INDENT: &str = "        ";
const GAP: usize = 2;
const VALUE_NAME: &str = "<value>";
const KEY_NAME: &str = "<key>";

/// Header lines joined by newlines.
pub(crate) fn header<C>(registry: &Registry<C>) -> String {
    registry
        .of_kind(DefKind::Header)
        .map(Definition::description)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full usage text for the registry.
pub(crate) fn render<C>(registry: &Registry<C>, program: &str, settings: &ParserSettings) -> String {
    let rows = render_order(registry);
    let body: Vec<String> = match settings.layout {
        UsageLayout::OneColumn => rows
            .iter()
            .filter_map(|def| one_column_row(registry, def))
            .collect(),
        UsageLayout::TwoColumns => {
            let width = signature_width(&rows, settings.max_signature_width);
            rows.iter()
                .filter_map(|def| two_column_row(registry, def, width))
                .collect()
        }
    };

    let mut text = header(registry);
    if !text.is_empty() {
        text.push('\n');
    }
    text.push_str("Usage: ");
    text.push_str(&scope_example(registry, program, None));
    if !body.is_empty() {
        text.push_str("\n\n");
        text.push_str(&body.join("\n"));
    }
    text
}

/// Visible definitions with every child set moved directly after its parent.
///
/// Children whose parent is never placed (hidden parents, for instance) are
/// left out.
pub(crate) fn render_order<C>(registry: &Registry<C>) -> Vec<&Definition<C>> {
    let (mut detached, mut sorted): (Vec<_>, Vec<_>) = registry
        .iter()
        .filter(|def| !matches!(def.kind(), DefKind::Header | DefKind::Check) && !def.is_hidden())
        .partition(|def| def.parent().is_some());

    let mut moved = true;
    while moved && !detached.is_empty() {
        moved = false;
        let mut index = 0;
        while let Some(parent) = sorted.get(index).map(|def| def.id()) {
            let (children, rest): (Vec<_>, Vec<_>) = detached
                .into_iter()
                .partition(|def| def.parent() == Some(parent));
            detached = rest;
            if !children.is_empty() {
                let at = index + 1;
                sorted.splice(at..at, children);
                moved = true;
            }
            index += 1;
        }
    }
    sorted
}

/// Usage example of a scope: the program (or command path) followed by a
/// summary of what may come next.
pub(crate) fn scope_example<C>(
    registry: &Registry<C>,
    program: &str,
    scope: Option<&Definition<C>>,
) -> String {
    let mut parts = vec![scope.map_or_else(|| program.to_owned(), |cmd| command_path(registry, cmd))];
    let parent = scope.map(Definition::id);

    let commands: Vec<&str> = registry
        .scoped(DefKind::Command, parent)
        .filter(|cmd| !cmd.is_hidden())
        .map(Definition::name)
        .collect();
    if !commands.is_empty() {
        parts.push(format!("[{}]", commands.join("|")));
    }
    if registry
        .scoped(DefKind::Option, parent)
        .any(|opt| !opt.is_hidden())
    {
        parts.push("[options]".to_owned());
    }
    let commands_take_arguments = registry.scoped(DefKind::Command, parent).any(|cmd| {
        registry
            .scoped(DefKind::Argument, Some(cmd.id()))
            .next()
            .is_some()
    });
    if commands_take_arguments {
        parts.push("<args>...".to_owned());
    } else {
        parts.extend(
            registry
                .scoped(DefKind::Argument, parent)
                .filter(|arg| !arg.is_hidden())
                .map(|arg| arg.name().to_owned()),
        );
    }
    parts.join(" ")
}

fn command_path<C>(registry: &Registry<C>, def: &Definition<C>) -> String {
    let mut chain = Vec::new();
    command_chain(registry, def, &mut chain);
    chain.join(" ")
}

fn command_chain<'r, C>(registry: &'r Registry<C>, def: &'r Definition<C>, chain: &mut Vec<&'r str>) {
    if let Some(parent) = def.parent().and_then(|id| registry.get(id)) {
        command_chain(registry, parent, chain);
    }
    if def.kind() == DefKind::Command {
        chain.push(def.name());
    }
}

fn with_value<C>(flag: String, def: &Definition<C>) -> String {
    let value = def.value_name().unwrap_or(VALUE_NAME);
    match def.arity() {
        Arity::Zero => flag,
        Arity::One => format!("{flag} {value}"),
        Arity::Two => format!("{flag}:{}={value}", def.key_name().unwrap_or(KEY_NAME)),
    }
}

fn long_form<C>(def: &Definition<C>) -> String {
    with_value(format!("--{}", def.name()), def)
}

/// Signature of an option or argument, or `None` for free-text kinds.
fn signature<C>(def: &Definition<C>, layout: UsageLayout) -> Option<String> {
    match def.kind() {
        DefKind::Argument => Some(def.name().to_owned()),
        DefKind::Option => Some(match (layout, def.short()) {
            (_, None) => long_form(def),
            (UsageLayout::OneColumn, Some(short)) => format!(
                "{} | {}",
                with_value(format!("-{short}"), def),
                long_form(def)
            ),
            (UsageLayout::TwoColumns, Some(short)) => format!("-{short}, {}", long_form(def)),
        }),
        _ => None,
    }
}

fn signature_width<C>(rows: &[&Definition<C>], cap: usize) -> usize {
    rows.iter()
        .filter_map(|def| signature(def, UsageLayout::TwoColumns))
        .map(|sig| INDENT.len() + sig.chars().count() + GAP)
        .max()
        .unwrap_or(0)
        .min(cap)
}

fn indent_continuation(text: &str, pad: &str) -> String {
    text.lines().collect::<Vec<_>>().join(&format!("\n{pad}"))
}

/// Free-text rendering shared by both layouts.
fn text_row<C>(registry: &Registry<C>, def: &Definition<C>) -> Option<String> {
    match def.kind() {
        DefKind::Note => Some(def.description().to_owned()),
        DefKind::Command => {
            let example = scope_example(registry, "", Some(def));
            Some(if def.description().is_empty() {
                format!("Command: {example}")
            } else {
                format!("Command: {example}\n{}", def.description())
            })
        }
        _ => None,
    }
}

fn one_column_row<C>(registry: &Registry<C>, def: &Definition<C>) -> Option<String> {
    let Some(sig) = signature(def, UsageLayout::OneColumn) else {
        return text_row(registry, def);
    };
    let description = def.description();
    Some(if description.is_empty() {
        format!("{INDENT}{sig}")
    } else {
        format!(
            "{INDENT}{sig}\n{DESCRIPTION_INDENT}{}",
            indent_continuation(description, DESCRIPTION_INDENT)
        )
    })
}

fn two_column_row<C>(registry: &Registry<C>, def: &Definition<C>, width: usize) -> Option<String> {
    let Some(sig) = signature(def, UsageLayout::TwoColumns) else {
        return text_row(registry, def);
    };
    let column = format!("{INDENT}{sig}");
    let description = def.description();
    if description.is_empty() {
        return Some(column);
    }
    let pad = " ".repeat(width);
    let text = indent_continuation(description, &pad);
    Some(if column.chars().count() + GAP <= width {
        format!("{column:<width$}{text}")
    } else {
        format!("{column}\n{pad}{text}")
    })
}
