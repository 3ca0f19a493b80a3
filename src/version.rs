//! Version tokens and the compatibility selector
//!
//! Runtime versions in manifests come in short dotted forms ("3.11", "20",
//! "1.72.1") that are compared numerically, component-wise, with missing
//! components treated as zero — so "3.9" < "3.11" and "20" satisfies ">=18.2".
//!
//! The compatibility selector takes a declared constraint expression (PEP 440
//! specifiers, `package.json` engine ranges, and similar) and a language's
//! ascending list of supported concrete versions, and picks the highest
//! supported member satisfying the constraint. Anything unparseable is a
//! "no match", which callers absorb by falling through to the next evidence
//! tier — constraint handling never aborts a resolution.

use std::cmp::Ordering;

/// A dotted numeric version token.
#[derive(Debug, Clone)]
pub struct Version {
    parts: Vec<u64>,
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl Version {
    /// Parses a dotted numeric token such as "3.11" or "1.72.1".
    ///
    /// Returns `None` for anything with non-numeric components ("stable",
    /// "3.x", "lts/*") — channel names and wildcards are not comparable
    /// versions.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let parts = text
            .split('.')
            .map(|p| p.parse::<u64>().ok())
            .collect::<Option<Vec<u64>>>()?;
        Some(Self { parts })
    }

    fn component(&self, index: usize) -> u64 {
        self.parts.get(index).copied().unwrap_or(0)
    }

    fn compare_padded(&self, other: &[u64]) -> Ordering {
        let len = self.parts.len().max(other.len());
        for i in 0..len {
            let lhs = self.component(i);
            let rhs = other.get(i).copied().unwrap_or(0);
            match lhs.cmp(&rhs) {
                Ordering::Equal => continue,
                non_eq => return non_eq,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_padded(&other.parts)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Eq,
    Ne,
    Ge,
    Le,
    Gt,
    Lt,
    Caret,
    Tilde,
}

/// One comparison clause of a constraint expression.
#[derive(Debug, Clone)]
struct Clause {
    op: Op,
    parts: Vec<u64>,
    /// Trailing `.*` / `.x` segment: the clause matches on prefix only.
    wildcard: bool,
}

impl Clause {
    fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        if token.is_empty() {
            return None;
        }
        // A bare "*" matches everything.
        if token == "*" {
            return Some(Self {
                op: Op::Eq,
                parts: Vec::new(),
                wildcard: true,
            });
        }

        let (op, rest) = if let Some(rest) = token.strip_prefix("~=") {
            (Op::Tilde, rest)
        } else if let Some(rest) = token.strip_prefix("==") {
            (Op::Eq, rest)
        } else if let Some(rest) = token.strip_prefix("!=") {
            (Op::Ne, rest)
        } else if let Some(rest) = token.strip_prefix(">=") {
            (Op::Ge, rest)
        } else if let Some(rest) = token.strip_prefix("<=") {
            (Op::Le, rest)
        } else if let Some(rest) = token.strip_prefix('>') {
            (Op::Gt, rest)
        } else if let Some(rest) = token.strip_prefix('<') {
            (Op::Lt, rest)
        } else if let Some(rest) = token.strip_prefix('^') {
            (Op::Caret, rest)
        } else if let Some(rest) = token.strip_prefix('~') {
            (Op::Tilde, rest)
        } else if let Some(rest) = token.strip_prefix('=') {
            (Op::Eq, rest)
        } else {
            (Op::Eq, token)
        };

        let rest = rest.trim();
        let mut parts = Vec::new();
        let mut wildcard = false;
        for segment in rest.split('.') {
            if wildcard {
                // Segments after a wildcard make the clause meaningless.
                return None;
            }
            match segment {
                "*" | "x" | "X" => wildcard = true,
                _ => parts.push(segment.parse::<u64>().ok()?),
            }
        }
        if parts.is_empty() && !wildcard {
            return None;
        }
        Some(Self { op, parts, wildcard })
    }

    fn matches(&self, version: &Version) -> bool {
        match self.op {
            Op::Eq => self.matches_eq(version),
            Op::Ne => !self.matches_eq(version),
            Op::Ge => version.compare_padded(&self.parts) != Ordering::Less,
            Op::Gt => version.compare_padded(&self.parts) == Ordering::Greater,
            Op::Le => version.compare_padded(&self.parts) != Ordering::Greater,
            Op::Lt => version.compare_padded(&self.parts) == Ordering::Less,
            Op::Caret => {
                version.compare_padded(&self.parts) != Ordering::Less
                    && version.compare_padded(&self.caret_upper()) == Ordering::Less
            }
            Op::Tilde => {
                version.compare_padded(&self.parts) != Ordering::Less
                    && version.compare_padded(&self.tilde_upper()) == Ordering::Less
            }
        }
    }

    fn matches_eq(&self, version: &Version) -> bool {
        if self.wildcard {
            // Prefix match: "3.*" accepts every 3.y.z.
            self.parts
                .iter()
                .enumerate()
                .all(|(i, p)| version.component(i) == *p)
        } else {
            version.compare_padded(&self.parts) == Ordering::Equal
        }
    }

    /// `^A.B.C` permits everything below the next breaking component: the
    /// first non-zero component is bumped.
    fn caret_upper(&self) -> Vec<u64> {
        for (i, part) in self.parts.iter().enumerate() {
            if *part != 0 || i == self.parts.len() - 1 {
                let mut upper = self.parts[..=i].to_vec();
                upper[i] += 1;
                return upper;
            }
        }
        vec![1]
    }

    /// `~=A.B` / `~A.B` permits patch-level drift: the second-to-last
    /// component is bumped ("~=3.8" → <4, "~=3.8.1" → <3.9).
    fn tilde_upper(&self) -> Vec<u64> {
        if self.parts.len() <= 1 {
            return vec![self.parts.first().copied().unwrap_or(0) + 1];
        }
        let mut upper = self.parts[..self.parts.len() - 1].to_vec();
        *upper.last_mut().expect("non-empty prefix") += 1;
        upper
    }
}

/// Parses a constraint expression into its conjunction of clauses.
///
/// Clauses are separated by commas (PEP 440) or whitespace (node engine
/// ranges). Returns `None` when any clause fails to parse — the whole
/// expression is then treated as "no match".
fn parse_constraint(expression: &str) -> Option<Vec<Clause>> {
    let tokens: Vec<&str> = expression
        .split(',')
        .flat_map(|part| part.split_whitespace())
        .filter(|t| !t.is_empty())
        .collect();
    if tokens.is_empty() {
        return None;
    }
    tokens.into_iter().map(Clause::parse).collect()
}

/// Picks the highest member of `supported` (ascending) satisfying the
/// constraint expression, or `None` when nothing matches or the expression
/// is unparseable.
pub fn select_highest(constraint: &str, supported: &[&str]) -> Option<String> {
    let clauses = parse_constraint(constraint)?;
    supported
        .iter()
        .copied()
        .filter(|candidate| {
            Version::parse(candidate)
                .map(|v| clauses.iter().all(|c| c.matches(&v)))
                .unwrap_or(false)
        })
        .last()
        .map(str::to_string)
}

/// Rust `rust-version` semantics: the manifest value is a minimum floor, not
/// a range. Picks the highest member of `supported` at or above the floor.
pub fn select_floor(minimum: &str, supported: &[&str]) -> Option<String> {
    let floor = Version::parse(minimum)?;
    supported
        .iter()
        .copied()
        .filter(|candidate| {
            Version::parse(candidate)
                .map(|v| v >= floor)
                .unwrap_or(false)
        })
        .last()
        .map(str::to_string)
}
