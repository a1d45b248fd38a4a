use crate::domain::UserId;

// ============== Authorization ==============

/// Only a configured admin may broadcast. With no admin configured, nobody is one.
pub fn is_admin(user_id: UserId, admin_id: Option<UserId>) -> bool {
    let Some(admin_id) = admin_id else {
        return false;
    };
    admin_id == user_id
}
