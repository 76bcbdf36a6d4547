//! Writes bound expressions as JavaScript.
//!
//! Every expression becomes a JavaScript expression of string type that
//! reads parameters through `c`, the runtime parameter collection. Parts
//! map onto the runtime helpers:
//!
//! | part         | JavaScript                                        |
//! |--------------|---------------------------------------------------|
//! | text         | `e("...")`                                        |
//! | parameter    | `af(v, format(v), true)` on the evaluated value   |
//! | switch       | `sw(c, value, none, format, cases)`               |
//! | format group | the expander applied to the wrapper and the inner |

use std::any::Any;
use std::fmt::{self, Write};

use glot::dialect::{BoundExpression, BoundFormatGroup, BoundPart, BoundSwitch};
use glot::interpreter::DEFAULT_MAX_DEPTH;
use glot::strategy::{
    CustomPart, FormatGroupExpander, ParameterEvaluator, SwitchCondition, ValueFormatter,
};
use serde_json::Value as JsonValue;

use crate::checker::MissingMapping;
use crate::generator::{ScriptGenerator, ScriptScope};

/// A JavaScript output buffer that dispatches strategies to their
/// generators.
pub struct ScriptWriter<'a> {
    generator: &'a ScriptGenerator,
    scope: ScriptScope<'a>,
    out: String,
    depth: usize,
}

impl<'a> ScriptWriter<'a> {
    pub(crate) fn new(generator: &'a ScriptGenerator, scope: ScriptScope<'a>) -> Self {
        Self {
            generator,
            scope,
            out: String::new(),
            depth: 0,
        }
    }

    pub fn scope(&self) -> &ScriptScope<'a> {
        &self.scope
    }

    /// How many [`ScriptWriter::nested`] calls enclose the current write.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }

    /// Write `text` as a string literal.
    pub fn string(&mut self, text: &str) -> fmt::Result {
        self.out.write_str(&string_literal(text))
    }

    pub fn number(&mut self, number: f64) -> fmt::Result {
        self.out.write_str(&number_literal(number))
    }

    /// Write a top-level expression: a string literal for plain text,
    /// otherwise a function of the parameter collection. With missing
    /// mappings the function returns a placeholder naming them.
    pub(crate) fn entry(&mut self, expression: &BoundExpression, missing: &[MissingMapping]) -> fmt::Result {
        if let Some(text) = expression.as_text() {
            return self.string(text);
        }
        if expression.parts.is_empty() {
            return self.string("");
        }

        self.write_str("function(c){return ")?;
        if missing.is_empty() {
            self.expression(expression)?;
        } else {
            self.write_str("[")?;
            for (index, mapping) in missing.iter().enumerate() {
                if index > 0 {
                    self.write_str(",")?;
                }
                self.string(&format!("{mapping}\n"))?;
            }
            self.write_str("].join('')")?;
        }
        self.write_str(";}")
    }

    /// Write an expression that evaluates to its text.
    pub fn expression(&mut self, expression: &BoundExpression) -> fmt::Result {
        match expression.parts.as_slice() {
            [] => self.string(""),
            [part] => self.part(part),
            parts => {
                self.write_str("[")?;
                for (index, part) in parts.iter().enumerate() {
                    if index > 0 {
                        self.write_str(",")?;
                    }
                    self.part(part)?;
                }
                self.write_str("].join('')")
            }
        }
    }

    fn part(&mut self, part: &BoundPart) -> fmt::Result {
        match part {
            BoundPart::Text(text) => {
                self.write_str("e(")?;
                self.string(text)?;
                self.write_str(")")
            }
            BoundPart::Parameter(parameter) => {
                self.write_str("(function(){var v=")?;
                self.evaluator(parameter.evaluator.as_ref())?;
                self.write_str(";return af(v,")?;
                self.formatter(parameter.formatter.as_ref(), "v")?;
                self.write_str(",true);})()")
            }
            BoundPart::Switch(switch) => self.switch(switch),
            BoundPart::FormatGroup(group) => self.format_group(group),
            BoundPart::Custom(custom) => self.custom_part(custom.part.as_ref()),
        }
    }

    /// Cases are tested on the value, or for lists on the forward and the
    /// backward index of each element.
    fn switch(&mut self, switch: &BoundSwitch) -> fmt::Result {
        self.write_str("sw(c,")?;
        self.evaluator(switch.evaluator.as_ref())?;
        self.write_str(",")?;
        match &switch.null_case {
            Some(null_case) => {
                self.write_str("function(){return ")?;
                self.expression(null_case)?;
                self.write_str(";}")?;
            }
            None => self.write_str("null")?,
        }
        self.write_str(",")?;
        match &switch.formatter {
            Some(formatter) => {
                self.write_str("function(v){return ")?;
                self.formatter(formatter.as_ref(), "v")?;
                self.write_str(";}")?;
            }
            None => self.write_str("null")?,
        }
        self.write_str(",function(v1,v2){return ")?;
        for case in &switch.cases {
            self.write_str("(")?;
            self.condition(case.condition.as_ref(), "v1")?;
            self.write_str("||v2!==undefined&&")?;
            self.condition(case.condition.as_ref(), "v2")?;
            self.write_str(")?")?;
            self.expression(&case.expression)?;
            self.write_str(":")?;
        }
        self.write_str("\"\";})")
    }

    /// An empty wrapper leaves the inner text as it is.
    fn format_group(&mut self, group: &BoundFormatGroup) -> fmt::Result {
        self.write_str("(function(){var p=val(")?;
        self.evaluator(group.evaluator.as_ref())?;
        self.write_str(");p=p==null?\"\":\"\"+p;var i=")?;
        match &group.expression {
            Some(expression) => self.expression(expression)?,
            None => self.string("")?,
        }
        self.write_str(";return p===\"\"?i:")?;
        self.expander(group.expander.as_ref(), "p", "i")?;
        self.write_str(";})()")
    }

    pub fn evaluator(&mut self, evaluator: &dyn ParameterEvaluator) -> fmt::Result {
        self.strategy(evaluator.as_any(), &[])
    }

    pub fn formatter(&mut self, formatter: &dyn ValueFormatter, value: &str) -> fmt::Result {
        self.strategy(formatter.as_any(), &[value])
    }

    pub fn condition(&mut self, condition: &dyn SwitchCondition, value: &str) -> fmt::Result {
        self.strategy(condition.as_any(), &[value])
    }

    pub fn expander(&mut self, expander: &dyn FormatGroupExpander, wrapper: &str, inner: &str) -> fmt::Result {
        self.strategy(expander.as_any(), &[wrapper, inner])
    }

    pub fn custom_part(&mut self, part: &dyn CustomPart) -> fmt::Result {
        self.strategy(part.as_any(), &[])
    }

    /// Run `write` one level deeper. Returns `Ok(false)` without running it
    /// when the nesting limit is reached.
    pub fn nested(&mut self, write: impl FnOnce(&mut Self) -> fmt::Result) -> Result<bool, fmt::Error> {
        if self.depth >= DEFAULT_MAX_DEPTH {
            return Ok(false);
        }
        self.depth += 1;
        let result = write(self);
        self.depth -= 1;
        result.map(|()| true)
    }

    /// Unmapped strategies are written as `undefined`. The checker reports
    /// them before writing starts.
    fn strategy(&mut self, strategy: &dyn Any, args: &[&str]) -> fmt::Result {
        let generator = self.generator;
        match generator.find(strategy.type_id()) {
            Some(found) => found.write(strategy, self, args),
            None => self.write_str("undefined"),
        }
    }
}

/// A JavaScript string literal. JSON string syntax is valid JavaScript.
pub(crate) fn string_literal(text: &str) -> String {
    JsonValue::from(text).to_string()
}

/// A JavaScript number literal. Integral values have no fraction.
pub(crate) fn number_literal(number: f64) -> String {
    if number.is_nan() {
        "NaN".to_string()
    } else if number.is_infinite() {
        if number > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        number.to_string()
    }
}

impl Write for ScriptWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.out.push_str(s);
        Ok(())
    }
}

impl fmt::Debug for ScriptWriter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptWriter")
            .field("scope", &self.scope)
            .field("depth", &self.depth)
            .field("out", &self.out)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_literals() {
        assert_eq!(number_literal(3.0), "3");
        assert_eq!(number_literal(-0.5), "-0.5");
        assert_eq!(number_literal(f64::INFINITY), "Infinity");
    }

    #[test]
    fn string_literals_escape_quotes_and_controls() {
        assert_eq!(string_literal("say \"hi\"\n"), r#""say \"hi\"\n""#);
        assert_eq!(string_literal("caf\u{e9}"), "\"caf\u{e9}\"");
    }
}
