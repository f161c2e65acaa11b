//! Evaluation context for tracking state during recursive formatting.

use crate::error::EvalError;

/// Default limit on nested rule-set calls.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// State carried through one formatting call.
///
/// Rule sets legitimately call themselves (`<<` and `>>` usually recurse into
/// the containing set), so only the depth is limited; the call stack is kept
/// for error reporting.
#[derive(Debug)]
pub(crate) struct EvalContext {
    /// Rule sets entered so far, outermost first.
    call_stack: Vec<String>,
    /// Maximum allowed depth.
    max_depth: usize,
}

impl EvalContext {
    pub(crate) fn with_max_depth(max_depth: usize) -> Self {
        Self {
            call_stack: Vec::new(),
            max_depth,
        }
    }

    /// Enter a rule set.
    ///
    /// Returns [`EvalError::MaxDepthExceeded`] with the full chain if the
    /// limit is reached.
    pub(crate) fn push_call(&mut self, name: &str) -> Result<(), EvalError> {
        if self.call_stack.len() >= self.max_depth {
            let mut chain = self.call_stack.clone();
            chain.push(name.to_string());
            return Err(EvalError::MaxDepthExceeded { chain });
        }
        self.call_stack.push(name.to_string());
        Ok(())
    }

    /// Leave the innermost rule set.
    pub(crate) fn pop_call(&mut self) {
        self.call_stack.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_limit_reports_chain() {
        let mut context = EvalContext::with_max_depth(2);
        context.push_call("a").unwrap();
        context.push_call("b").unwrap();
        assert_eq!(
            context.push_call("a"),
            Err(EvalError::MaxDepthExceeded {
                chain: vec!["a".into(), "b".into(), "a".into()],
            })
        );
    }

    #[test]
    fn pop_call_frees_a_level() {
        let mut context = EvalContext::with_max_depth(2);
        context.push_call("a").unwrap();
        context.push_call("b").unwrap();
        context.pop_call();
        context.push_call("c").unwrap();
        assert_eq!(
            context.push_call("d"),
            Err(EvalError::MaxDepthExceeded {
                chain: vec!["a".into(), "c".into(), "d".into()],
            })
        );
    }
}
