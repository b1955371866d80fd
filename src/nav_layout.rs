//! Navigation Layout
//!
//! Which screens the sidebar shows, grouped into sections, in what order.
//! The published layout lives on the server (`/navigation`); while an
//! admin is rearranging it, a draft is kept in localStorage.

use serde::{Deserialize, Serialize};

use crate::config::local_storage;
use crate::logging;

pub const DRAFT_STORAGE_KEY: &str = "nav_layout_draft";

/// Every screen in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    #[default]
    Customers,
    Sites,
    Estimates,
    Invoices,
    Contracts,
    Projects,
    Equipment,
    Employees,
    Safety,
    Messages,
    Workflows,
    Bills,
    Vendors,
    Access,
    Navigation,
    #[serde(other)]
    Unknown,
}

impl Page {
    pub const ALL: &'static [Page] = &[
        Page::Customers,
        Page::Sites,
        Page::Estimates,
        Page::Invoices,
        Page::Contracts,
        Page::Projects,
        Page::Equipment,
        Page::Employees,
        Page::Safety,
        Page::Messages,
        Page::Workflows,
        Page::Bills,
        Page::Vendors,
        Page::Access,
        Page::Navigation,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Page::Customers => "Customers",
            Page::Sites => "Sites",
            Page::Estimates => "Estimates",
            Page::Invoices => "Invoices",
            Page::Contracts => "Contracts",
            Page::Projects => "Projects",
            Page::Equipment => "Equipment",
            Page::Employees => "Employees",
            Page::Safety => "Safety",
            Page::Messages => "Messages",
            Page::Workflows => "Workflows",
            Page::Bills => "Bills",
            Page::Vendors => "Vendors",
            Page::Access => "Access",
            Page::Navigation => "Navigation",
            Page::Unknown => "Unknown",
        }
    }

    /// Stable numeric id, used as the drag handle id
    pub fn id(self) -> u32 {
        Page::ALL.iter().position(|p| *p == self).map(|i| i as u32).unwrap_or(u32::MAX)
    }

    pub fn from_id(id: u32) -> Option<Page> {
        Page::ALL.get(id as usize).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavEntry {
    pub page: Page,
    #[serde(default)]
    pub label: String,
    #[serde(default = "default_true")]
    pub visible: bool,
}

fn default_true() -> bool {
    true
}

impl NavEntry {
    pub fn new(page: Page) -> Self {
        Self { page, label: page.label().to_string(), visible: true }
    }

    pub fn display_label(&self) -> &str {
        if self.label.trim().is_empty() {
            self.page.label()
        } else {
            &self.label
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavSection {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub entries: Vec<NavEntry>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NavLayout {
    #[serde(default)]
    pub sections: Vec<NavSection>,
}

impl NavLayout {
    pub fn default_layout() -> Self {
        let section = |id: u32, title: &str, pages: &[Page]| NavSection {
            id,
            title: title.to_string(),
            entries: pages.iter().copied().map(NavEntry::new).collect(),
        };
        Self {
            sections: vec![
                section(1, "Sales", &[Page::Customers, Page::Estimates, Page::Contracts, Page::Invoices]),
                section(2, "Operations", &[Page::Sites, Page::Projects, Page::Equipment, Page::Safety]),
                section(3, "Team", &[Page::Employees, Page::Messages, Page::Workflows]),
                section(4, "Accounting", &[Page::Bills, Page::Vendors]),
                section(5, "Admin", &[Page::Access, Page::Navigation]),
            ],
        }
    }

    /// Repair a layout from the server or a stale draft: drop unknown and
    /// duplicate pages, append missing ones to the last section
    pub fn normalized(mut self) -> Self {
        if self.sections.is_empty() {
            return Self::default_layout();
        }
        let mut seen = Vec::new();
        for section in &mut self.sections {
            section.entries.retain(|entry| {
                if entry.page == Page::Unknown || seen.contains(&entry.page) {
                    return false;
                }
                seen.push(entry.page);
                true
            });
        }
        let missing: Vec<Page> = Page::ALL.iter().copied().filter(|p| !seen.contains(p)).collect();
        if let Some(last) = self.sections.last_mut() {
            last.entries.extend(missing.into_iter().map(NavEntry::new));
        }
        for section in &mut self.sections {
            for entry in &mut section.entries {
                if entry.page == Page::Navigation {
                    entry.visible = true;
                }
            }
        }
        self
    }

    fn locate(&self, page: Page) -> Option<(usize, usize)> {
        self.sections.iter().enumerate().find_map(|(si, section)| {
            section.entries.iter().position(|e| e.page == page).map(|ei| (si, ei))
        })
    }

    /// Move `page` so it sits before the entry at `index` of `section_id`
    /// (index == len appends). Returns false when nothing changed.
    pub fn move_entry(&mut self, page: Page, section_id: u32, index: usize) -> bool {
        let Some(target) = self.sections.iter().position(|s| s.id == section_id) else {
            return false;
        };
        let Some((from_section, from_index)) = self.locate(page) else {
            return false;
        };
        let mut index = index;
        if from_section == target {
            if index == from_index || index == from_index + 1 {
                return false;
            }
            if index > from_index {
                index -= 1;
            }
        }
        let entry = self.sections[from_section].entries.remove(from_index);
        let entries = &mut self.sections[target].entries;
        let index = index.min(entries.len());
        entries.insert(index, entry);
        true
    }

    /// Hide or show a page; the navigation editor itself always stays visible
    pub fn toggle_visible(&mut self, page: Page) {
        if page == Page::Navigation {
            return;
        }
        if let Some((si, ei)) = self.locate(page) {
            let entry = &mut self.sections[si].entries[ei];
            entry.visible = !entry.visible;
        }
    }

    pub fn rename_entry(&mut self, page: Page, label: &str) {
        if let Some((si, ei)) = self.locate(page) {
            self.sections[si].entries[ei].label = label.trim().to_string();
        }
    }

    pub fn rename_section(&mut self, section_id: u32, title: &str) {
        if let Some(section) = self.sections.iter_mut().find(|s| s.id == section_id) {
            section.title = title.trim().to_string();
        }
    }

    pub fn add_section(&mut self, title: &str) -> u32 {
        let id = self.sections.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        self.sections.push(NavSection { id, title: title.trim().to_string(), entries: Vec::new() });
        id
    }

    /// Only empty sections can be removed
    pub fn remove_section(&mut self, section_id: u32) -> bool {
        let before = self.sections.len();
        self.sections.retain(|s| s.id != section_id || !s.entries.is_empty());
        self.sections.len() != before
    }

    /// Sections as the sidebar shows them: hidden entries and empty sections dropped
    pub fn visible_sections(&self) -> Vec<NavSection> {
        self.sections
            .iter()
            .map(|section| NavSection {
                id: section.id,
                title: section.title.clone(),
                entries: section.entries.iter().filter(|e| e.visible).cloned().collect(),
            })
            .filter(|section| !section.entries.is_empty())
            .collect()
    }

    pub fn pages(&self) -> Vec<Page> {
        self.sections.iter().flat_map(|s| s.entries.iter().map(|e| e.page)).collect()
    }
}

// ========================
// Local draft
// ========================

pub fn save_draft(layout: &NavLayout) {
    let Some(storage) = local_storage() else { return };
    match serde_json::to_string(layout) {
        Ok(json) => {
            if storage.set_item(DRAFT_STORAGE_KEY, &json).is_err() {
                logging::warn("NAV", "could not write layout draft");
            }
        }
        Err(e) => logging::error("NAV", format!("layout draft serialization failed: {}", e)),
    }
}

pub fn load_draft() -> Option<NavLayout> {
    let json = local_storage()?.get_item(DRAFT_STORAGE_KEY).ok()??;
    match serde_json::from_str::<NavLayout>(&json) {
        Ok(layout) => Some(layout.normalized()),
        Err(e) => {
            logging::warn("NAV", format!("discarding unreadable layout draft: {}", e));
            None
        }
    }
}

pub fn clear_draft() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(DRAFT_STORAGE_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section_pages(layout: &NavLayout, id: u32) -> Vec<Page> {
        layout.sections.iter().find(|s| s.id == id).unwrap().entries.iter().map(|e| e.page).collect()
    }

    fn assert_each_page_once(layout: &NavLayout) {
        let pages = layout.pages();
        assert_eq!(pages.len(), Page::ALL.len());
        for page in Page::ALL {
            assert_eq!(pages.iter().filter(|p| *p == page).count(), 1, "{:?}", page);
        }
    }

    #[test]
    fn test_default_layout_covers_every_page() {
        assert_each_page_once(&NavLayout::default_layout());
    }

    #[test]
    fn test_move_within_section() {
        let mut layout = NavLayout::default_layout();
        // Customers to the end of Sales
        assert!(layout.move_entry(Page::Customers, 1, 4));
        assert_eq!(section_pages(&layout, 1), vec![Page::Estimates, Page::Contracts, Page::Invoices, Page::Customers]);
        // Invoices to the front
        assert!(layout.move_entry(Page::Invoices, 1, 0));
        assert_eq!(section_pages(&layout, 1), vec![Page::Invoices, Page::Estimates, Page::Contracts, Page::Customers]);
        assert_each_page_once(&layout);
    }

    #[test]
    fn test_move_onto_own_slot_is_noop() {
        let mut layout = NavLayout::default_layout();
        assert!(!layout.move_entry(Page::Estimates, 1, 1));
        assert!(!layout.move_entry(Page::Estimates, 1, 2));
        assert_eq!(layout, NavLayout::default_layout());
    }

    #[test]
    fn test_move_across_sections() {
        let mut layout = NavLayout::default_layout();
        assert!(layout.move_entry(Page::Safety, 3, 0));
        assert_eq!(section_pages(&layout, 2), vec![Page::Sites, Page::Projects, Page::Equipment]);
        assert_eq!(section_pages(&layout, 3)[0], Page::Safety);
        assert!(layout.move_entry(Page::Bills, 5, 99));
        assert_eq!(section_pages(&layout, 5).last(), Some(&Page::Bills));
        assert_each_page_once(&layout);
    }

    #[test]
    fn test_move_to_unknown_section_is_rejected() {
        let mut layout = NavLayout::default_layout();
        assert!(!layout.move_entry(Page::Sites, 42, 0));
        assert_eq!(layout, NavLayout::default_layout());
    }

    #[test]
    fn test_normalize_repairs_layout() {
        let layout = NavLayout {
            sections: vec![NavSection {
                id: 9,
                title: "Everything".to_string(),
                entries: vec![
                    NavEntry::new(Page::Invoices),
                    NavEntry::new(Page::Unknown),
                    NavEntry::new(Page::Invoices),
                    NavEntry { page: Page::Navigation, label: String::new(), visible: false },
                ],
            }],
        }
        .normalized();
        assert_each_page_once(&layout);
        assert_eq!(layout.sections[0].entries[0].page, Page::Invoices);
        assert!(layout.sections[0].entries.iter().all(|e| e.page != Page::Navigation || e.visible));
        assert_eq!(NavLayout::default().normalized(), NavLayout::default_layout());
    }

    #[test]
    fn test_unknown_pages_from_server_decode() {
        let json = r#"{"sections": [{"id": 1, "title": "Main", "entries": [{"page": "invoices"}, {"page": "fleet_map"}]}]}"#;
        let layout: NavLayout = serde_json::from_str(json).unwrap();
        assert_eq!(layout.sections[0].entries[1].page, Page::Unknown);
        assert!(layout.sections[0].entries[0].visible);
        assert_each_page_once(&layout.normalized());
    }

    #[test]
    fn test_visibility() {
        let mut layout = NavLayout::default_layout();
        layout.toggle_visible(Page::Bills);
        layout.toggle_visible(Page::Vendors);
        layout.toggle_visible(Page::Navigation);
        let visible = layout.visible_sections();
        assert!(visible.iter().all(|s| s.title != "Accounting"));
        assert!(visible.iter().any(|s| s.entries.iter().any(|e| e.page == Page::Navigation)));
    }

    #[test]
    fn test_sections_and_labels() {
        let mut layout = NavLayout::default_layout();
        let id = layout.add_section("  Reports ");
        assert_eq!(id, 6);
        assert_eq!(layout.sections.last().unwrap().title, "Reports");
        assert!(!layout.remove_section(1));
        assert!(layout.remove_section(id));

        layout.rename_entry(Page::Access, "Users & roles");
        let entry = layout.sections[4].entries.iter().find(|e| e.page == Page::Access).unwrap();
        assert_eq!(entry.display_label(), "Users & roles");
        layout.rename_entry(Page::Access, " ");
        let entry = layout.sections[4].entries.iter().find(|e| e.page == Page::Access).unwrap();
        assert_eq!(entry.display_label(), "Access");
    }

    #[test]
    fn test_page_ids_round_trip() {
        for page in Page::ALL {
            assert_eq!(Page::from_id(page.id()), Some(*page));
        }
        assert_eq!(Page::from_id(999), None);
    }
}
