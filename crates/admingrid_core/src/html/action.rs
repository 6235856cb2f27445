//! Client-side action invocation descriptors.
//!
//! An action is the call a rendered handler makes into the page's script
//! layer, e.g. `Joomla.tableOrdering('name','desc','')`. The script layer
//! itself is out of scope; only the call shape is produced here.

/// One argument of a client-side call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsArg {
    /// Rendered as a single-quoted JS string literal.
    Str(String),
    /// Rendered as a bare integer literal.
    Int(i64),
    /// Rendered verbatim; only for trusted expressions like `this.checked`.
    Expr(String),
}

impl JsArg {
    fn to_js(&self) -> String {
        match self {
            Self::Str(value) => format!("'{}'", super::escape_js(value)),
            Self::Int(value) => value.to_string(),
            Self::Expr(expr) => expr.clone(),
        }
    }

    /// Returns the string payload for `Str` arguments.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Returns the integer payload for `Int` arguments.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }
}

/// A named client-side function call with ordered arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientAction {
    function: String,
    args: Vec<JsArg>,
}

impl ClientAction {
    pub fn new(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            args: Vec::new(),
        }
    }

    pub fn str_arg(mut self, value: impl Into<String>) -> Self {
        self.args.push(JsArg::Str(value.into()));
        self
    }

    pub fn int_arg(mut self, value: i64) -> Self {
        self.args.push(JsArg::Int(value));
        self
    }

    pub fn expr_arg(mut self, expr: impl Into<String>) -> Self {
        self.args.push(JsArg::Expr(expr.into()));
        self
    }

    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn args(&self) -> &[JsArg] {
        &self.args
    }

    /// Renders the call expression, without a trailing semicolon.
    pub fn to_js(&self) -> String {
        let args = self
            .args
            .iter()
            .map(JsArg::to_js)
            .collect::<Vec<_>>()
            .join(",");
        format!("{}({args})", self.function)
    }
}
