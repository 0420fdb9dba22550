use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum View {
    Home,
    RoomDetail,
    AdminLogin,
    AdminDashboard,
    About,
}

/// Per-session navigation state. The dashboard is unreachable without the
/// admin flag: navigating there unauthenticated lands on the login view
/// instead.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub current_view: View,
    pub selected_room_id: Option<i64>,
    pub is_admin: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            current_view: View::Home,
            selected_room_id: None,
            is_admin: false,
        }
    }
}

impl ViewState {
    pub fn navigate(&mut self, view: View) {
        self.current_view = match view {
            View::AdminDashboard if !self.is_admin => View::AdminLogin,
            other => other,
        };
    }

    pub fn select_room(&mut self, room_id: i64) {
        self.selected_room_id = Some(room_id);
        self.current_view = View::RoomDetail;
    }

    pub fn login(&mut self) {
        self.is_admin = true;
        self.navigate(View::AdminDashboard);
    }

    pub fn logout(&mut self) {
        self.is_admin = false;
        self.selected_room_id = None;
        self.navigate(View::Home);
    }
}
