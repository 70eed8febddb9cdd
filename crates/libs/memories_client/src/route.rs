/// Screens of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Slideshow,
    Login,
    Dashboard,
}

impl Route {
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Slideshow => "/",
            Self::Login => "/admin",
            Self::Dashboard => "/admin/dashboard",
        }
    }
}
