//! Skip-label management for conditionals
//!
//! Labels for compiler-introduced branch targets are kept on an explicit
//! stack: IF pushes, ENDIF pops. The label name is derived from the nesting
//! depth at push time, so sibling conditionals reuse names once the stack
//! returns to a prior depth; that is sound because each skip label is
//! referenced exactly once between its IF and the matching ENDIF. Popping an
//! empty stack returns `None`, which the generator reports as an unmatched
//! ENDIF instead of fabricating a malformed label.

#[derive(Debug, Default)]
pub struct LabelStack {
    stack: Vec<String>,
}

impl LabelStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// Open a conditional: mint the skip label for the new nesting depth.
    pub fn push_skip(&mut self) -> String {
        let label = format!(".if_{}_skip", self.stack.len() + 1);
        self.stack.push(label.clone());
        label
    }

    /// Close the innermost conditional.
    pub fn pop(&mut self) -> Option<String> {
        self.stack.pop()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_nested_labels() {
        let mut labels = LabelStack::new();
        assert_eq!(labels.push_skip(), ".if_1_skip");
        assert_eq!(labels.push_skip(), ".if_2_skip");
        assert_eq!(labels.pop(), Some(".if_2_skip".to_string()));
        assert_eq!(labels.pop(), Some(".if_1_skip".to_string()));
        assert_eq!(labels.depth(), 0);
    }

    #[test]
    fn test_siblings_reuse_names() {
        let mut labels = LabelStack::new();
        assert_eq!(labels.push_skip(), ".if_1_skip");
        labels.pop();
        assert_eq!(labels.push_skip(), ".if_1_skip");
        labels.pop();
    }

    #[test]
    fn test_unmatched_pop() {
        let mut labels = LabelStack::new();
        assert_eq!(labels.pop(), None);
        labels.push_skip();
        labels.pop();
        assert_eq!(labels.pop(), None);
    }
}
