//! The collaborator the interactive session talks to, and a line-oriented
//! terminal implementation of it.

use std::io::{self, BufRead, Write};

// ─── Trait ────────────────────────────────────────────────────────────────────

/// Everything the session needs from a user interface.
///
/// Prompts block until answered. End of input reads as an empty answer (or
/// "no" for [`Console::confirm`]); there is no separate cancel state.
pub trait Console {
  fn show_info(&mut self, message: &str);

  fn show_error(&mut self, message: &str);

  fn confirm(&mut self, question: &str) -> bool;

  fn prompt_text(&mut self, label: &str) -> String;

  fn prompt_secret(&mut self, label: &str) -> String;

  fn render_table(&mut self, title: &str, columns: &[&str], rows: &[Vec<String>]);

  /// Offer `items` under `title`. `None` means "back" (or quit at the top).
  fn menu(&mut self, title: &str, items: &[&str]) -> Option<usize>;
}

// ─── Terminal ─────────────────────────────────────────────────────────────────

/// A [`Console`] over a line reader and a writer (stdin/stdout in the binary).
pub struct Terminal<R, W> {
  input:  R,
  output: W,
}

impl Terminal<io::StdinLock<'static>, io::Stdout> {
  pub fn stdio() -> Self { Self::new(io::stdin().lock(), io::stdout()) }
}

impl<R: BufRead, W: Write> Terminal<R, W> {
  pub fn new(input: R, output: W) -> Self { Self { input, output } }

  /// Read one line without its terminator. EOF and read errors give "".
  fn read_line(&mut self) -> String {
    let mut line = String::new();
    if self.input.read_line(&mut line).is_err() {
      return String::new();
    }
    line.trim_end_matches(['\n', '\r']).to_string()
  }

  fn ask(&mut self, label: &str) -> String {
    // Prompt output is best-effort.
    write!(self.output, "{label} ").ok();
    self.output.flush().ok();
    self.read_line()
  }
}

impl<R: BufRead, W: Write> Console for Terminal<R, W> {
  fn show_info(&mut self, message: &str) { writeln!(self.output, "{message}").ok(); }

  fn show_error(&mut self, message: &str) {
    writeln!(self.output, "error: {message}").ok();
  }

  fn confirm(&mut self, question: &str) -> bool {
    let answer = self.ask(&format!("{question} [y/N]"));
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
  }

  fn prompt_text(&mut self, label: &str) -> String { self.ask(label) }

  fn prompt_secret(&mut self, label: &str) -> String { self.ask(label) }

  fn render_table(&mut self, title: &str, columns: &[&str], rows: &[Vec<String>]) {
    let text = format_table(title, columns, rows);
    self.output.write_all(text.as_bytes()).ok();
    self.output.flush().ok();
  }

  fn menu(&mut self, title: &str, items: &[&str]) -> Option<usize> {
    loop {
      writeln!(self.output, "\n== {title} ==").ok();
      for (i, item) in items.iter().enumerate() {
        writeln!(self.output, "  {}. {item}", i + 1).ok();
      }
      writeln!(self.output, "  0. Back").ok();

      let answer = self.ask(">");
      match answer.trim() {
        "" | "0" | "q" => return None,
        other => match other.parse::<usize>() {
          Ok(n) if (1..=items.len()).contains(&n) => return Some(n - 1),
          _ => {
            writeln!(self.output, "error: no such option: {other}").ok();
          }
        },
      }
    }
  }
}

// ─── Table layout ─────────────────────────────────────────────────────────────

/// Lay out `rows` under `columns` with each column padded to its widest cell.
pub fn format_table(title: &str, columns: &[&str], rows: &[Vec<String>]) -> String {
  let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
  for row in rows {
    for (w, cell) in widths.iter_mut().zip(row) {
      *w = (*w).max(cell.chars().count());
    }
  }

  let mut out = format!("\n{title}\n");
  out.push_str(&pad_row(columns, &widths));
  let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
  out.push_str(&rule.join("  "));
  out.push('\n');
  if rows.is_empty() {
    out.push_str("(no rows)\n");
  }
  for row in rows {
    let cells: Vec<&str> = row.iter().map(String::as_str).collect();
    out.push_str(&pad_row(&cells, &widths));
  }
  out
}

fn pad_row(cells: &[&str], widths: &[usize]) -> String {
  let padded: Vec<String> = cells
    .iter()
    .zip(widths)
    .map(|(cell, &w)| format!("{cell:<w$}"))
    .collect();
  format!("{}\n", padded.join("  ").trim_end())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn terminal(input: &str) -> Terminal<&[u8], Vec<u8>> {
    Terminal::new(input.as_bytes(), Vec::new())
  }

  #[test]
  fn prompts_strip_line_endings_and_eof_is_empty() {
    let mut t = terminal("Fnatic\r\n");
    assert_eq!(t.prompt_text("Team:"), "Fnatic");
    assert_eq!(t.prompt_text("Team:"), "");
  }

  #[test]
  fn confirm_defaults_to_no() {
    let mut t = terminal("y\n\nnope\n");
    assert!(t.confirm("Register?"));
    assert!(!t.confirm("Register?"));
    assert!(!t.confirm("Register?"));
    assert!(!t.confirm("Register?"));
  }

  #[test]
  fn menu_retries_until_a_valid_choice() {
    let mut t = terminal("9\nabc\n2\n");
    assert_eq!(t.menu("Main", &["User Mode", "Admin Mode"]), Some(1));
    let shown = String::from_utf8(t.output).unwrap();
    assert!(shown.contains("no such option: 9"));
    assert!(shown.contains("no such option: abc"));
  }

  #[test]
  fn menu_back_on_zero_or_eof() {
    let mut t = terminal("0\n");
    assert_eq!(t.menu("Main", &["User Mode"]), None);
    assert_eq!(t.menu("Main", &["User Mode"]), None);
  }

  #[test]
  fn table_columns_are_aligned() {
    let text = format_table("Team Scores", &["Team", "Wins"], &[
      vec!["Team Liquid".into(), "12".into()],
      vec!["OG".into(), "3".into()],
    ]);
    assert_eq!(
      text,
      "\nTeam Scores\nTeam         Wins\n-----------  ----\nTeam Liquid  12\nOG           3\n"
    );
  }

  #[test]
  fn empty_table_says_so() {
    let text = format_table("Teams", &["Teams"], &[]);
    assert!(text.ends_with("-----\n(no rows)\n"));
  }
}
