//! Display equations of the form `lhs <sign> rhs`

use serde::Deserialize;

use crate::domain::content::Renderable;
use crate::domain::target::RenderTarget;

/// Math environment wrapping an equation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MathEnvironment {
    #[default]
    Equation,
    /// `breqn` automatic line breaking
    Dmath,
    Multline,
}

impl MathEnvironment {
    pub fn name(&self) -> &'static str {
        match self {
            MathEnvironment::Equation => "equation",
            MathEnvironment::Dmath => "dmath",
            MathEnvironment::Multline => "multline",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equation {
    lhs: String,
    rhs: String,
    sign: String,
    environment: MathEnvironment,
    dfrac: bool,
    pre: Option<String>,
    post: Option<String>,
}

impl Equation {
    pub fn new(lhs: impl Into<String>, rhs: impl Into<String>) -> Self {
        Self {
            lhs: lhs.into(),
            rhs: rhs.into(),
            sign: "=".to_string(),
            environment: MathEnvironment::default(),
            dfrac: false,
            pre: None,
            post: None,
        }
    }

    pub fn with_sign(mut self, sign: impl Into<String>) -> Self {
        self.sign = sign.into();
        self
    }

    pub fn with_environment(mut self, environment: MathEnvironment) -> Self {
        self.environment = environment;
        self
    }

    /// Rewrite `\frac` as `\dfrac` on both sides.
    pub fn with_dfrac(mut self, dfrac: bool) -> Self {
        self.dfrac = dfrac;
        self
    }

    /// Fragment placed before the left-hand side.
    pub fn with_pre(mut self, pre: impl Into<String>) -> Self {
        self.pre = Some(pre.into());
        self
    }

    /// Fragment placed after the right-hand side.
    pub fn with_post(mut self, post: impl Into<String>) -> Self {
        self.post = Some(post.into());
        self
    }

    /// Body of the environment, without the begin/end lines.
    pub fn body(&self) -> String {
        let (mut lhs, mut rhs) = (self.lhs.clone(), self.rhs.clone());
        if self.dfrac {
            lhs = lhs.replace("\\frac", "\\dfrac");
            rhs = rhs.replace("\\frac", "\\dfrac");
        }
        if let Some(pre) = &self.pre {
            lhs = format!("{} {}", pre, lhs);
        }
        if let Some(post) = &self.post {
            rhs = format!("{} {}", rhs, post);
        }
        format!("{} {} {}", lhs, self.sign, rhs)
    }
}

impl Renderable for Equation {
    fn render_into(&self, target: &mut dyn RenderTarget) {
        let environment = self.environment.name();
        target.begin_environment(environment, None, &[]);
        target.append_raw(&self.body());
        target.end_environment(environment);
    }
}
