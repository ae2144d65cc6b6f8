//! Navigation menu and dashboard widget catalogs.
//!
//! Entries whose requirement is not granted are omitted from the visible
//! lists entirely. They are never returned in a disabled form.

use serde::Serialize;

use quarry_entity::permission::{Action, PermissionMap, Resource};

use super::gate::{PermissionGate, Requirement};

/// A sidebar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// Route path.
    pub path: &'static str,
    /// Arabic label.
    pub label: &'static str,
    /// Resource the entry is gated on.
    pub resource: Resource,
    /// Permission needed for the entry to appear.
    #[serde(skip)]
    pub requirement: Requirement,
}

impl NavItem {
    const fn read(path: &'static str, label: &'static str, resource: Resource) -> Self {
        Self::gated(path, label, resource, Action::Read)
    }

    const fn gated(
        path: &'static str,
        label: &'static str,
        resource: Resource,
        action: Action,
    ) -> Self {
        Self {
            path,
            label,
            resource,
            requirement: Requirement::new(resource, action),
        }
    }

    /// Whether the entry appears for `map`.
    pub fn is_visible(&self, map: &PermissionMap) -> bool {
        PermissionGate::allows(map, self.requirement)
    }
}

/// Every sidebar entry, in display order.
pub const MENU: &[NavItem] = &[
    NavItem::read("/dashboard", "لوحة التحكم", Resource::Dashboard),
    NavItem::read("/org-chart", "الهيكل التنظيمي", Resource::OrgChart),
    NavItem::read("/projects", "المشاريع", Resource::Projects),
    NavItem::read("/feasibility-studies", "دراسات الجدوى", Resource::FeasibilityStudies),
    NavItem::read("/investments", "الاستثمارات", Resource::Investments),
    NavItem::read("/financial-projections", "التوقعات المالية", Resource::FinancialProjections),
    NavItem::read("/accounting", "المحاسبة", Resource::ChartOfAccounts),
    NavItem::read("/equipment", "المعدات", Resource::Equipment),
    NavItem::read("/production", "الإنتاج", Resource::Production),
    NavItem::read("/expenses", "المصروفات", Resource::Expenses),
    NavItem::read("/invoices", "الفواتير", Resource::Invoices),
    NavItem::read("/attendance", "الحضور", Resource::Attendance),
    // Every staff role may read users; only managing them earns the entry.
    NavItem::gated("/users", "المستخدمون", Resource::Users, Action::Create),
];

/// Sidebar entries granted by `map`.
pub fn visible_menu(map: &PermissionMap) -> Vec<NavItem> {
    MENU.iter().filter(|item| item.is_visible(map)).copied().collect()
}

/// A dashboard summary card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardWidget {
    /// Stable widget identifier.
    pub id: &'static str,
    /// Arabic title.
    pub title: &'static str,
    /// Resource whose data the widget summarizes.
    pub resource: Resource,
}

/// Every dashboard widget, in display order.
pub const DASHBOARD_WIDGETS: &[DashboardWidget] = &[
    DashboardWidget { id: "production", title: "الإنتاج", resource: Resource::Production },
    DashboardWidget { id: "equipment", title: "المعدات", resource: Resource::Equipment },
    DashboardWidget { id: "expenses", title: "المصروفات", resource: Resource::Expenses },
    DashboardWidget { id: "invoices", title: "الفواتير", resource: Resource::Invoices },
    DashboardWidget { id: "attendance", title: "الحضور", resource: Resource::Attendance },
];

/// Dashboard widgets whose data `map` allows reading.
pub fn visible_widgets(map: &PermissionMap) -> Vec<DashboardWidget> {
    DASHBOARD_WIDGETS
        .iter()
        .filter(|widget| PermissionGate::allows(map, Requirement::read(widget.resource)))
        .copied()
        .collect()
}
