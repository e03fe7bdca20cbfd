use crate::{index::MemberIndex, Issue};

/// Attach to every issue the first of its assignees that we know about.
///
/// Assignee ids missing from the index are skipped silently. Issues with no
/// resolvable assignee keep `None`. Returns how many issues got one.
pub fn assign_members(issues: &mut [Issue], member_index: &MemberIndex) -> usize {
    let mut resolved = 0;
    for issue in issues.iter_mut() {
        issue.assignee = issue
            .assignee_ids
            .iter()
            .find_map(|id| member_index.get(id))
            .cloned();
        if issue.assignee.is_some() {
            resolved += 1;
        }
    }
    resolved
}

/// Sort by creator id. The sort is stable: issues from the same creator keep
/// their input order.
pub fn sort_by_creator(issues: &mut [Issue]) {
    issues.sort_by(|a, b| a.created_by.cmp(&b.created_by));
}
