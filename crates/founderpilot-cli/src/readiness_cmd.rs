//! The `fpilot readiness` command: sequential question loop, graded result.

use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};

use founderpilot_core::readiness::{
    ReadinessQuestion, ReadinessQuestionEngine, ReadinessResult, ReadinessScorer, SurveyProfile,
};

/// Run the assessment and print the result.
///
/// `answers` takes comma-separated 1-based option numbers for
/// non-interactive use (e.g. `--answers 3,2,2,3,1`); without it the
/// questions are asked one at a time on stdin.
pub fn run_readiness(answers: Option<&str>, json: bool) -> Result<()> {
    let mut engine = ReadinessQuestionEngine::new();

    match answers {
        Some(spec) => apply_scripted_answers(&mut engine, spec)?,
        None => {
            let stdin = std::io::stdin();
            let mut input = stdin.lock();
            let mut output = std::io::stdout();
            run_interactive(&mut engine, &mut input, &mut output)?;
        }
    }

    let questions = engine.questions().to_vec();
    let answers = engine.into_answers();
    let profile = answers.profile(&questions);
    let result = ReadinessScorer::new()
        .score(&answers)
        .context("scoring failed")?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&result).context("failed to serialize result")?
        );
    } else {
        println!("{}", render_result(&result, profile.as_ref()));
    }

    Ok(())
}

/// Feed a comma-separated answer list through the engine in order.
fn apply_scripted_answers(engine: &mut ReadinessQuestionEngine, spec: &str) -> Result<()> {
    for raw in spec.split(',') {
        let Some(question) = engine.current().cloned() else {
            bail!("too many answers: the assessment has {} questions", engine.progress().1);
        };
        let choice = parse_choice(raw, question.options.len()).with_context(|| {
            format!(
                "answer {raw:?} for question {} must be a number between 1 and {}",
                question.id,
                question.options.len()
            )
        })?;
        engine
            .answer(question.id, choice)
            .with_context(|| format!("answer for question {} rejected", question.id))?;
    }

    if !engine.is_complete() {
        let (answered, total) = engine.progress();
        bail!("expected {total} answers, got {answered}");
    }
    Ok(())
}

/// Ask each question on the given streams until the sequence completes.
fn run_interactive(
    engine: &mut ReadinessQuestionEngine,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<()> {
    while let Some(question) = engine.current().cloned() {
        let (answered, total) = engine.progress();
        writeln!(output)?;
        writeln!(output, "[{}/{}] {}", answered + 1, total, question.question)?;
        writeln!(output, "    {}", question.context)?;
        for (i, option) in question.options.iter().enumerate() {
            writeln!(output, "    {}) {}", i + 1, option)?;
        }
        write!(output, "> ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            bail!("input ended before the assessment was complete");
        }

        match parse_choice(&line, question.options.len()) {
            Some(choice) => {
                // The id matches current() by construction, so this only
                // fails on engine misuse, which is a bug worth surfacing.
                engine
                    .answer(question.id, choice)
                    .with_context(|| format!("answer for question {} rejected", question.id))?;
            }
            None => {
                writeln!(
                    output,
                    "    Enter a number between 1 and {}.",
                    question.options.len()
                )?;
            }
        }
    }
    Ok(())
}

/// Parse a 1-based option number into a 0-based index.
fn parse_choice(raw: &str, available: usize) -> Option<usize> {
    let n: usize = raw.trim().parse().ok()?;
    if n >= 1 && n <= available {
        Some(n - 1)
    } else {
        None
    }
}

/// Render the scored result for the terminal.
fn render_result(result: &ReadinessResult, profile: Option<&SurveyProfile>) -> String {
    let mut out = String::new();

    out.push_str("\n# Readiness Report\n\n");
    out.push_str(&format!("**Score:** {}/100\n", result.score));
    out.push_str(&format!("**Grade:** {}\n\n", result.grade));
    out.push_str(&result.verdict);
    out.push_str("\n\n");

    if result.blindspots.is_empty() {
        out.push_str("No blind spots flagged.\n");
    } else {
        out.push_str("## Blind Spots\n\n");
        for spot in &result.blindspots {
            out.push_str(&format!("- {spot}\n"));
        }
    }

    if let Some(profile) = profile {
        out.push_str("\n## Your Inputs\n\n");
        out.push_str(&format!("- Weekly hours: {}\n", profile.hours_per_week));
        out.push_str(&format!(
            "- Spoken to users: {}\n",
            if profile.has_spoken_to_users { "yes" } else { "not enough" }
        ));
        out.push_str(&format!("- Team: {}\n", profile.team_size));
        out.push_str(&format!(
            "- Can build in-house: {}\n",
            if profile.can_build { "yes" } else { "not yet" }
        ));
        out.push_str(&format!("- Starting budget: {}\n", profile.starting_budget));
    }

    out
}

/// List the question library (the `fpilot questions` command).
pub fn print_questions(questions: &[ReadinessQuestion]) {
    for question in questions {
        println!("{}. {}", question.id, question.question);
        println!("   {}", question.context);
        for (i, option) in question.options.iter().enumerate() {
            println!("   {}) {}", i + 1, option);
        }
        println!();
    }
}
