//! Bootstrap documents written when the store directory is first created.

/// Placeholder replaced with the creation time when a template is rendered.
pub const TIMESTAMP_PLACEHOLDER: &str = "{timestamp}";

/// Fixed `filename -> template` table.
pub const BOOTSTRAP_CATALOG: &[(&str, &str)] = &[
    ("productContext.md", PRODUCT_CONTEXT),
    ("activeContext.md", ACTIVE_CONTEXT),
    ("progress.md", PROGRESS),
    ("decisionLog.md", DECISION_LOG),
    ("systemPatterns.md", SYSTEM_PATTERNS),
];

const PRODUCT_CONTEXT: &str = r#"# Product Context

High-level overview of the project and the product being built. Update it as
goals, features and architecture evolve.
{timestamp} - Log of updates made will be appended as footnotes to the end of this file.

## Project Goal

## Key Features

## Overall Architecture
"#;

const ACTIVE_CONTEXT: &str = r#"# Active Context

Tracks what is being worked on right now: current focus, recent changes and
open questions.
{timestamp} - Log of updates made.

## Current Focus

## Recent Changes

## Open Questions/Issues
"#;

const PROGRESS: &str = r#"# Progress

Task-level progress, kept as a running list.
{timestamp} - Log of updates made.

## Completed Tasks

## Current Tasks

## Next Steps
"#;

const DECISION_LOG: &str = r#"# Decision Log

Architectural and implementation decisions with their rationale.
{timestamp} - Log of updates made.

## Decision

## Rationale

## Implementation Details
"#;

const SYSTEM_PATTERNS: &str = r#"# System Patterns

Recurring patterns and conventions used in the project.
{timestamp} - Log of updates made.

## Coding Patterns

## Architectural Patterns

## Testing Patterns
"#;

/// Look up the raw template for a catalog document.
pub fn template_for(name: &str) -> Option<&'static str> {
    BOOTSTRAP_CATALOG
        .iter()
        .find(|(file, _)| *file == name)
        .map(|(_, template)| *template)
}

/// Substitute the timestamp placeholder in a template.
pub fn render(template: &str, timestamp: &str) -> String {
    template.replace(TIMESTAMP_PLACEHOLDER, timestamp)
}
