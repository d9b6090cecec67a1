// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! LaTeX-to-plottable-expression normalizer
//!
//! Rewrites the raw LaTeX transcription coming back from the vision model
//! into a flat infix expression a generic plotting evaluator can parse
//! (`*` for multiplication, `^(...)` exponent grouping, ASCII function
//! names, `PI` for the constant).
//!
//! This is deliberately a fixed sequence of plain substring substitutions,
//! not a LaTeX parser. Several behaviors downstream depend on the specific
//! imprecision (notably the glued-trig repair), so the step order must not
//! be rearranged.

/// Rewrite a raw LaTeX equation string into a plottable expression string.
///
/// Total and deterministic: never fails, worst case the output is only
/// partially normalized and the caller's expression parser rejects it.
pub fn normalize(raw: &str) -> String {
    // Strip markdown code fences the model tends to wrap its answer in.
    let mut clean = raw
        .replace("```latex", "")
        .replace("```", "")
        .trim()
        .to_string();

    // Equations are assumed to be `y = f(x)`; only f(x) is graphed. The
    // split is on the LAST `=` so a malformed multi-`=` string keeps only
    // the final right-hand side.
    if let Some(pos) = clean.rfind('=') {
        clean = clean[pos + 1..].to_string();
    }

    // Sizing directives decorate delimiters we want to keep.
    clean = clean.replace("\\left", "").replace("\\right", "");

    // Semantic no-op wrappers; the macro name goes, the brace group stays
    // and is picked up by the generic brace conversion below.
    clean = clean.replace("\\mathrm", "").replace("\\text", "");

    clean = clean
        .replace("\\sin", "sin")
        .replace("\\cos", "cos")
        .replace("\\tan", "tan");
    clean = clean.replace("\\sqrt", "sqrt");

    // `\ln` and `\log` both become `log`; the base distinction is lost.
    clean = clean.replace("\\log", "log").replace("\\ln", "log");

    // OCR (and the macro stripping above) produce glued single-letter
    // arguments like `sinx`. Pure substring repair, not boundary-aware:
    // spaced forms such as `sin x` are intentionally left alone.
    clean = clean
        .replace("sinx", "sin(x)")
        .replace("cosx", "cos(x)")
        .replace("tanx", "tan(x)");

    // Constant before variable: `pi` must become `PI` before `theta`
    // becomes `x`, so a literal `pi` is never re-touched afterwards.
    clean = clean.replace("\\pi", "PI").replace("pi", "PI");

    // Any angle variable is treated as the graphing variable.
    clean = clean.replace("\\theta", "x").replace("theta", "x");

    // Only the macro name is removed; the two brace groups degrade to
    // `(a)(b)` after brace conversion, with no division operator inserted.
    clean = clean.replace("\\frac", "");

    // Exponent-specific conversion first, then the catch-all brace pass so
    // `^{` is never mangled into `^(` plus an orphaned paren.
    clean = clean.replace("^{", "^(").replace('}', ")");
    clean = clean.replace('{', "(").replace('}', ")");

    clean = clean
        .replace("\\cdot", "*")
        .replace('×', "*")
        .replace('÷', "/");

    clean.trim().to_string()
}
