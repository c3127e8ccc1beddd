//! Page margin checks.

use shared_docx::DocxDocument;
use shared_types::{
    CorrectionRequest, MarginSide, RuleConfig, Severity, Violation, ViolationKind,
};

/// 2mm slack so rounding through the twips unit never flags a margin that
/// was set correctly.
const TOLERANCE_CM: f64 = 0.2;

/// Float slack on top of the tolerance so a margin sitting exactly on the
/// boundary (4.2cm against a 4cm target) is still in tolerance.
const EPSILON_CM: f64 = 1e-9;

pub fn check_margins(config: &RuleConfig, doc: &DocxDocument) -> Vec<Violation> {
    let mut violations = Vec::new();

    for (section_idx, section) in doc.sections.iter().enumerate() {
        let sides = [
            (MarginSide::Top, section.margins.top_cm, "Top"),
            (MarginSide::Bottom, section.margins.bottom_cm, "Bottom"),
            (MarginSide::Left, section.margins.left_cm, "Left"),
            (MarginSide::Right, section.margins.right_cm, "Right"),
        ];

        for (side, actual_cm, label) in sides {
            let expected_cm = config.margin_cm(side);
            if (actual_cm - expected_cm).abs() <= TOLERANCE_CM + EPSILON_CM {
                continue;
            }
            violations.push(Violation::correctable(
                ViolationKind::MarginError,
                Severity::Error,
                format!(
                    "{label} margin is {actual_cm:.1}cm but should be {expected_cm}cm \
                     according to {} guidelines",
                    config.university.abbreviation
                ),
                format!("Section {}", section_idx + 1),
                CorrectionRequest::Margin {
                    margin: side,
                    value_cm: expected_cm,
                },
            ));
        }
    }

    violations
}
