use std::io::{self, BufRead, Write};

/// Asks the operator to type `yes` before any policy is modified.
pub fn confirm<R: BufRead, W: Write>(project_count: usize, input: &mut R, output: &mut W) -> io::Result<bool> {
    let bang = "!".repeat(80);
    writeln!(output, "\n{bang}")?;
    writeln!(output, "WARNING: About to modify IAM policies on {project_count} projects")?;
    writeln!(output, "{bang}")?;
    write!(output, "\nType 'yes' to continue: ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("yes"))
}
