use slang_api::{are_optional_equivalent, IfTree, MatchTree, Tree};

/// Branches of an if-else-if chain or of a match
pub(crate) struct ConditionalStructure<'a> {
    /// In source order; match cases without a body keep a `None` slot
    pub(crate) branches: Vec<Option<&'a Tree>>,

    /// True when the chain ends with `else` or the match has a default case
    pub(crate) all_branches_present: bool,
}

impl<'a> ConditionalStructure<'a> {
    pub(crate) fn of_if(tree: &'a IfTree) -> Self {
        let mut branches = vec![Some(tree.then_branch())];
        let mut all_branches_present = false;
        let mut else_branch = tree.else_branch();
        while let Some(branch) = else_branch {
            match branch {
                Tree::If(else_if) => {
                    branches.push(Some(else_if.then_branch()));
                    else_branch = else_if.else_branch();
                }
                _ => {
                    branches.push(Some(branch));
                    all_branches_present = true;
                    else_branch = None;
                }
            }
        }
        Self {
            branches,
            all_branches_present,
        }
    }

    pub(crate) fn of_match(tree: &'a MatchTree) -> Self {
        let mut branches = Vec::new();
        let mut all_branches_present = false;
        for case in tree.cases() {
            branches.push(case.body());
            if case.expression().is_none() {
                all_branches_present = true;
            }
        }
        Self {
            branches,
            all_branches_present,
        }
    }

    /// At least two branches, all equivalent to the first
    pub(crate) fn all_branches_identical(&self) -> bool {
        match self.branches.split_first() {
            Some((first, rest)) if !rest.is_empty() => rest
                .iter()
                .all(|branch| are_optional_equivalent(*first, *branch, false)),
            _ => false,
        }
    }

    pub(crate) fn present_branches(&self) -> Vec<&'a Tree> {
        self.branches.iter().flatten().copied().collect()
    }
}

/// Whether an `if` starts a chain of its own: either it is not nested in
/// another `if`, or it is the `then` branch of that `if`
pub(crate) fn starts_chain(parent: Option<&Tree>, tree: &IfTree) -> bool {
    match parent {
        Some(Tree::If(parent)) => {
            matches!(parent.then_branch(), Tree::If(then) if std::ptr::eq(then, tree))
        }
        _ => true,
    }
}
