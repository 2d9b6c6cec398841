//! Centralized icon definitions.
//!
//! Icon theme is configured in `config.rs` via `ICON_THEME`.
//! This module maps semantic icon names to the selected theme's icons.

use icondata::Icon;

use crate::config::IconTheme;

// =============================================================================
// Theme Imports
// =============================================================================

mod lucide {
    pub use icondata::{
        LuBookmark as Bookmark, LuFolder as Folder, LuFolderOpen as SharedFolder,
        LuHouse as Home, LuLock as Lock, LuLogIn as SignIn, LuLogOut as SignOut,
        LuTriangleAlert as Warning, LuUser as User,
    };
}

mod bootstrap {
    pub use icondata::{
        BsBookmarkFill as Bookmark, BsBoxArrowInRight as SignIn, BsBoxArrowRight as SignOut,
        BsExclamationTriangle as Warning, BsFolderFill as Folder, BsFolderSymlink as SharedFolder,
        BsHouseFill as Home, BsLockFill as Lock, BsPerson as User,
    };
}

// =============================================================================
// Icon Constants (selected based on theme)
// =============================================================================

macro_rules! themed_icon {
    ($name:ident, $theme_name:ident) => {
        pub const $name: Icon = match crate::config::ICON_THEME {
            IconTheme::Lucide => lucide::$theme_name,
            IconTheme::Bootstrap => bootstrap::$theme_name,
        };
    };
}

themed_icon!(HOME, Home);
themed_icon!(USER, User);
themed_icon!(BOOKMARK, Bookmark);
themed_icon!(FOLDER, Folder);
themed_icon!(SHARED_FOLDER, SharedFolder);
themed_icon!(SIGN_IN, SignIn);
themed_icon!(SIGN_OUT, SignOut);
themed_icon!(LOCK, Lock);
themed_icon!(WARNING, Warning);
