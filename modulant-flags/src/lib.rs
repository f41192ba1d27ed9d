//
// Modulant build tools for the Modulant Eurorack module firmware
// Copyright (C) 2023-2026 the Modulant authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
//

//! Translates free-text build-request comments into compiler defines.
//!
//! A build request is a human-written comment naming optional firmware
//! features, for example `calibr8or, vor; pew pew pew`. The translator
//! tokenizes the request and folds it through a rule table into a single
//! space-separated define string for the firmware build.
//!
//! The rule tables are TOML data, not code. Two tables ship built in, one
//! per firmware line; custom tables can be loaded from disk.

use serde::Deserialize;

static CLASSIC_RULES: &str = include_str!("../rules/classic.toml");
static SUITE_RULES: &str = include_str!("../rules/suite.toml");

/// A rule table plus the base define that seeds every result.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSet {
    /// Define prepended to every translation result.
    pub base: String,
    /// Prefix rules, evaluated in order for every token.
    #[serde(rename = "rule", default)]
    pub rules: Vec<Rule>,
    /// Optional counting rule, evaluated after the prefix rules.
    pub counter: Option<CounterRule>,
}

/// A single prefix rule.
///
/// Fires when a token starts with any of `prefixes`, appending all of
/// `defines`. Rules are independent: a token may fire several rules, and a
/// rule fires once per matching token with no deduplication.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Rule {
    /// Upper-case token prefixes.
    pub prefixes: Vec<String>,
    /// Defines appended when the rule fires.
    pub defines: Vec<String>,
}

/// A threshold-counting rule.
///
/// A token starting with `full` appends `define` directly and does not
/// count. Otherwise a token starting with `partial` increments a counter;
/// when more than `threshold` tokens have counted, `define` is appended
/// once after all tokens are processed.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CounterRule {
    /// Prefix that appends the define immediately.
    pub full: String,
    /// Prefix that merely counts.
    pub partial: String,
    /// Count that must be exceeded for the define to be appended.
    pub threshold: u32,
    /// Define controlled by this rule.
    pub define: String,
}

impl RuleSet {
    /// Parses a rule table from TOML.
    pub fn from_toml(src: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(src)
    }

    /// Built-in rule table of the classic firmware.
    pub fn classic() -> Self {
        Self::from_toml(CLASSIC_RULES).unwrap()
    }

    /// Built-in rule table of the suite firmware.
    pub fn suite() -> Self {
        Self::from_toml(SUITE_RULES).unwrap()
    }

    /// Translates a build request into a define string.
    ///
    /// The result starts with the base define and grows by one append per
    /// fired rule, in token encounter order. Tokens matching no rule are
    /// ignored; an empty request yields the base define alone.
    pub fn translate(&self, request: &str) -> String {
        let mut defines = self.base.clone();
        let mut counted = 0u32;

        for token in tokenize(request) {
            for rule in &self.rules {
                if rule.prefixes.iter().any(|prefix| token.starts_with(prefix.as_str())) {
                    for define in &rule.defines {
                        log::debug!("token {token} appends {define}");
                        defines.push(' ');
                        defines.push_str(define);
                    }
                }
            }

            if let Some(counter) = &self.counter {
                if token.starts_with(counter.full.as_str()) {
                    log::debug!("token {token} appends {}", counter.define);
                    defines.push(' ');
                    defines.push_str(&counter.define);
                } else if token.starts_with(counter.partial.as_str()) {
                    counted += 1;
                }
            }
        }

        if let Some(counter) = &self.counter {
            if counted > counter.threshold {
                log::debug!("{counted} counted tokens append {}", counter.define);
                defines.push(' ');
                defines.push_str(&counter.define);
            }
        }

        defines
    }
}

/// Splits a build request into upper-cased tokens.
///
/// Commas and semicolons become spaces first, so any run of separators
/// collapses to a token boundary.
pub fn tokenize(request: &str) -> Vec<String> {
    request.replace([',', ';'], " ").split_whitespace().map(|token| token.to_uppercase()).collect()
}
