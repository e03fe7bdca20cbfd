use std::collections::HashMap;

use crate::{Member, MemberIndexKey, User};

/// { member id --> member }
pub type MemberIndex = HashMap<String, Member>;

/// Index the members embedded in the users by their member id.
///
/// Later users overwrite earlier ones sharing the same member id. Empty ids
/// are kept like any other key.
pub fn build_member_index(users: &[User]) -> MemberIndex {
    users
        .iter()
        .map(|user| (user.index(), user.member.clone()))
        .collect::<MemberIndex>()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(member_id: &str, display_name: &str) -> User {
        User {
            id: format!("user-{member_id}"),
            member: Member {
                id: member_id.to_string(),
                display_name: display_name.to_string(),
                ..Default::default()
            },
        }
    }

    #[test]
    fn indexes_by_member_id() {
        let index = build_member_index(&[user("m1", "ann"), user("m2", "bob")]);
        assert_eq!(index.len(), 2);
        assert_eq!(index["m2"].display_name, "bob");
    }

    #[test]
    fn last_duplicate_wins() {
        let index = build_member_index(&[user("m1", "first"), user("m1", "second")]);
        assert_eq!(index.len(), 1);
        assert_eq!(index["m1"].display_name, "second");
    }

    #[test]
    fn empty_id_is_a_valid_key() {
        let index = build_member_index(&[user("", "nobody")]);
        assert_eq!(index[""].display_name, "nobody");
    }
}
