use arith::{get_opts, run_arith, ArithResult};
use difference::{Changeset, Difference};
use lazy_static::lazy_static;
use std::path::{Path, PathBuf};

lazy_static! {
    pub static ref BLESS: bool = std::env::var("BLESS") == Ok("1".into());
    /// Root of the scratch directories tests write their files to.
    pub static ref SCRATCH: PathBuf =
        std::env::temp_dir().join(format!("arith-system-tests-{}", std::process::id()));
}

macro_rules! fail {
    ($($content:expr),*) => {
        libtest_mimic::Outcome::Failed {
            msg: Some(format!($($content),*)),
        }
    };
}

/// Unwraps a result, or returns a failed outcome from the enclosing test.
macro_rules! t {
    ($result:expr) => {
        match $result {
            Ok(ok) => ok,
            Err(e) => return fail!("{}", e),
        }
    };
}

/// Returns the clause `name` of a test file: the text between two `===name` lines. The newline
/// before the closing delimiter is not part of the clause.
pub fn get_clause(content: &str, name: &str) -> Option<String> {
    let delim = format!("==={}\n", name);
    let mut splits = content.split(&delim);
    splits.next()?;
    let mut clause = splits.next()?.to_owned();
    splits.next()?;
    if clause.ends_with('\n') {
        clause.pop();
    }
    Some(clause)
}

/// Renders a clause for a blessed test file.
pub fn make_clause(name: &str, clause: &str) -> String {
    let delim = format!("==={}", name);
    if clause.is_empty() {
        format!("{}\n{}\n", delim, delim)
    } else {
        format!("{}\n{}\n{}\n", delim, clause, delim)
    }
}

/// Creates an empty scratch directory for a test.
pub fn scratch_dir(test_name: &str) -> std::io::Result<PathBuf> {
    let name: String = test_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    let dir = SCRATCH.join(name);
    if dir.exists() {
        std::fs::remove_dir_all(&dir)?;
    }
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Runs arith with the given arguments, as if from the command line.
pub fn run(args: &[String]) -> Result<ArithResult, String> {
    let args = std::iter::once("arith".to_owned()).chain(args.iter().cloned());
    let opts = get_opts(|app| app.get_matches_from_safe(args), false).map_err(|e| e.message)?;
    Ok(run_arith(opts))
}

/// Replaces occurrences of a scratch directory in `text`, so that output is independent of it.
pub fn scrub(text: &str, dir: &Path) -> String {
    text.replace(&dir.display().to_string(), "$DIR")
}

/// Renders a diff between an expected and an actual text.
pub fn diff(expected: &str, actual: &str) -> String {
    let Changeset { diffs, .. } = Changeset::new(expected, actual, "\n");
    let mut rendered = String::new();
    for diff in diffs {
        let (content, prefix) = match diff {
            Difference::Same(ref x) => (x.clone(), " "),
            Difference::Add(ref x) => (x.clone(), "+"),
            Difference::Rem(ref x) => (x.clone(), "-"),
        };
        for line in content.lines() {
            rendered.push_str(prefix);
            rendered.push_str(line);
            rendered.push('\n');
        }
    }
    rendered
}

/// Returns the command to bless a test file.
pub fn get_bless_cmd(test_name: &str) -> String {
    format!(
        "BLESS=1 cargo test -p arith --test system_tests -- \"{}\"",
        test_name
    )
}
