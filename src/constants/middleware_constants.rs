use actix_web::http::Method;
use once_cell::sync::Lazy;
use std::collections::HashSet;

// Flash texts shown by the renderer. The auth gate strings are load-bearing:
// the frontend test-suite matches on them verbatim.
pub const FLASH_LOGIN_REQUIRED: &str = "You dont access to this page, Login please.";
pub const FLASH_ALREADY_LOGGED: &str = "You are logged";
pub const FLASH_FORBIDDEN: &str = "You dont have permission to do this.";
pub const FLASH_USER_SIGNED: &str = "User successfully signed!";
pub const FLASH_USER_LOGGED: &str = "User successfully logged";
pub const FLASH_LOGGED_OUT: &str = "You are logged out";
pub const FLASH_PASSWORD_CHANGED: &str = "Your secret is correct, your password changed";
pub const FLASH_PERSONAL_UPDATED: &str = "New personal information!";
pub const FLASH_SOCIAL_UPDATED: &str = "New social information!";
pub const FLASH_MEDIA_UPDATED: &str = "Your media was updated successfully";
pub const FLASH_SONG_CREATED: &str = "Song successfully created!";
pub const FLASH_SONG_DELETED: &str = "Song deleted";
pub const FLASH_ALBUM_CREATED: &str = "Album successfully created!";
pub const FLASH_ALBUM_DELETED: &str = "Album deleted";

// Routes that must be accessed only while logged out.
pub static GUEST_ONLY_ROUTES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    let mut set = HashSet::new();
    set.insert("/auth");
    set.insert("/auth/register");
    set
});

// Login-required GET pages. Mutating routes are covered by `requires_login`
// wholesale, so only the form/state pages need listing.
static LOGIN_REQUIRED_PREFIXES: [&'static str; 4] = [
    "/auth/setting",
    "/auth/logout",
    "/auth/change_password",
    "/music/create",
];

pub fn is_guest_only(path: &str) -> bool {
    GUEST_ONLY_ROUTES.contains(path)
}

/// Every create/update/delete surface sits behind the login gate, along with
/// the settings, logout and change-password pages.
pub fn requires_login(path: &str, method: &Method) -> bool {
    if is_guest_only(path) {
        return false;
    }
    if LOGIN_REQUIRED_PREFIXES.iter().any(|p| path.starts_with(p)) {
        return true;
    }
    if *method == Method::GET {
        return false;
    }
    path.starts_with("/music") || path.starts_with("/auth") || path.starts_with("/admin")
}

pub fn requires_admin(path: &str) -> bool {
    path.starts_with("/admin")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_and_register_are_guest_only() {
        assert!(is_guest_only("/auth"));
        assert!(is_guest_only("/auth/register"));
        assert!(!is_guest_only("/auth/setting"));
    }

    #[test]
    fn mutations_require_login() {
        assert!(requires_login("/music/create/song", &Method::GET));
        assert!(requires_login("/music/song/3", &Method::DELETE));
        assert!(requires_login("/music/song/3/like", &Method::POST));
        assert!(requires_login("/auth/setting/personal", &Method::POST));
        assert!(requires_login("/auth/logout", &Method::GET));
    }

    #[test]
    fn public_reads_do_not_require_login() {
        assert!(!requires_login("/music/", &Method::GET));
        assert!(!requires_login("/music/song/3", &Method::GET));
        assert!(!requires_login("/auth", &Method::POST));
        assert!(!requires_login("/auth/register", &Method::POST));
        assert!(!requires_login("/user/charly", &Method::GET));
    }

    #[test]
    fn admin_prefix_requires_admin() {
        assert!(requires_admin("/admin/users"));
        assert!(!requires_admin("/music/"));
    }
}
