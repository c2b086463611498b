//! Routing definitions for the Photoshare UI.
use crate::core::auth::RouteAccess;
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq, Eq, Debug)]
pub(crate) enum Route {
    #[at("/")]
    Feed,
    #[at("/login")]
    Login,
    #[at("/register")]
    Register,
    #[at("/create")]
    Create,
    #[at("/comments/:photo_id")]
    Comments { photo_id: String },
    #[at("/search")]
    Search,
    #[at("/profile")]
    MyProfile,
    #[at("/profile/:id")]
    Profile { id: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    /// Session requirement for the route.
    pub(crate) const fn access(&self) -> RouteAccess {
        match self {
            Self::Login | Self::Register => RouteAccess::GuestOnly,
            Self::NotFound => RouteAccess::Public,
            Self::Feed
            | Self::Create
            | Self::Comments { .. }
            | Self::Search
            | Self::MyProfile
            | Self::Profile { .. } => RouteAccess::Protected,
        }
    }
}
