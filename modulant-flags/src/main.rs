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

//! Build-request translator.
//!
//! Reads the build-request comment from `GH_COMMENT`, prints the resulting
//! define string and republishes it as `CUSTOM_BUILD_FLAGS` for the calling
//! build system. Takes no command-line arguments; `MODULANT_RULES` selects
//! the rule table (`suite`, `classic`, or a path to a TOML file).

use anyhow::{Context, Result};
use std::{env, fs};

use modulant_flags::RuleSet;

const REQUEST_VAR: &str = "GH_COMMENT";
const OUTPUT_VAR: &str = "CUSTOM_BUILD_FLAGS";
const RULES_VAR: &str = "MODULANT_RULES";

fn rule_set() -> Result<RuleSet> {
    match env::var(RULES_VAR) {
        Ok(selection) if selection == "suite" => Ok(RuleSet::suite()),
        Ok(selection) if selection == "classic" => Ok(RuleSet::classic()),
        Ok(path) => {
            let src =
                fs::read_to_string(&path).with_context(|| format!("cannot read rule table {path}"))?;
            RuleSet::from_toml(&src).with_context(|| format!("cannot parse rule table {path}"))
        }
        Err(_) => Ok(RuleSet::suite()),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let request = env::var(REQUEST_VAR).with_context(|| format!("{REQUEST_VAR} is not set"))?;
    let rules = rule_set()?;

    let defines = rules.translate(&request);
    println!("{defines}");
    env::set_var(OUTPUT_VAR, &defines);

    Ok(())
}
