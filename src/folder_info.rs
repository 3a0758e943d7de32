// folder_info.rs — Folder remark record and field table
//
// FolderInfo carries the six strings stored in a folder's desktop.ini.
// FolderField names each one and maps it to its INI key.

// ── Field table ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FolderField {
    Alias,      // [.ShellClassInfo] LocalizedResourceName
    InfoTip,    // [.ShellClassInfo] InfoTip
    Title,      // [{F29F85E0-...}] Prop2
    Subject,    // [{F29F85E0-...}] Prop3
    Author,     // [{F29F85E0-...}] Prop4
    Tags,       // [{F29F85E0-...}] Prop5
}

impl FolderField {
    pub const COUNT: usize = 6;

    /// All fields in display and on-disk order.
    pub const ALL: [FolderField; Self::COUNT] = [
        FolderField::Alias,
        FolderField::InfoTip,
        FolderField::Title,
        FolderField::Subject,
        FolderField::Author,
        FolderField::Tags,
    ];

    /// INI key the field is stored under.
    pub fn key(self) -> &'static str {
        match self {
            FolderField::Alias   => "LocalizedResourceName",
            FolderField::InfoTip => "InfoTip",
            FolderField::Title   => "Prop2",
            FolderField::Subject => "Prop3",
            FolderField::Author  => "Prop4",
            FolderField::Tags    => "Prop5",
        }
    }

    /// Short name used on the command line and in listings.
    pub fn display_name(self) -> &'static str {
        match self {
            FolderField::Alias   => "alias",
            FolderField::InfoTip => "tip",
            FolderField::Title   => "title",
            FolderField::Subject => "subject",
            FolderField::Author  => "author",
            FolderField::Tags    => "tags",
        }
    }

    /// True for the four PropN fields that carry the "31," type prefix.
    pub fn is_folder_option(self) -> bool {
        !matches!(self, FolderField::Alias | FolderField::InfoTip)
    }

    ////////////////////////////////////////////////////////////////////////////
    //
    //  from_name
    //
    //  Case-insensitive lookup by INI key or display name ("tip", "Prop5",
    //  "infotip" all resolve).
    //
    ////////////////////////////////////////////////////////////////////////////

    pub fn from_name(name: &str) -> Option<FolderField> {
        let name = name.trim();

        Self::ALL.iter().copied().find(|f| {
            f.key().eq_ignore_ascii_case(name) || f.display_name().eq_ignore_ascii_case(name)
        })
        .or_else(|| {
            if name.eq_ignore_ascii_case("infotip") || name.eq_ignore_ascii_case("remark") {
                Some(FolderField::InfoTip)
            } else if name.eq_ignore_ascii_case("name") {
                Some(FolderField::Alias)
            } else {
                None
            }
        })
    }
}

// ── Cleaning ──────────────────────────────────────────────────────────────────

/// Strips trailing CR, LF, space and tab.  Values are never multi-line on disk.
pub fn clean_text(text: &str) -> &str {
    text.trim_end_matches(['\r', '\n', ' ', '\t'])
}

// ── FolderInfo ────────────────────────────────────────────────────────────────

/// Remark values for one folder.  An empty string means "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderInfo {
    pub localized_resource_name: String,
    pub info_tip:                String,
    pub prop2:                   String,
    pub prop3:                   String,
    pub prop4:                   String,
    pub prop5:                   String,
}

impl FolderInfo {
    /// Info-tip plus tags only; the two fields the simple editor exposed.
    pub fn with_remark(remark: &str, tags: &str) -> Self {
        FolderInfo {
            info_tip: remark.into(),
            prop5:    tags.into(),
            ..Default::default()
        }
    }

    pub fn get(&self, field: FolderField) -> &str {
        match field {
            FolderField::Alias   => &self.localized_resource_name,
            FolderField::InfoTip => &self.info_tip,
            FolderField::Title   => &self.prop2,
            FolderField::Subject => &self.prop3,
            FolderField::Author  => &self.prop4,
            FolderField::Tags    => &self.prop5,
        }
    }

    pub fn set(&mut self, field: FolderField, value: impl Into<String>) {
        let slot = match field {
            FolderField::Alias   => &mut self.localized_resource_name,
            FolderField::InfoTip => &mut self.info_tip,
            FolderField::Title   => &mut self.prop2,
            FolderField::Subject => &mut self.prop3,
            FolderField::Author  => &mut self.prop4,
            FolderField::Tags    => &mut self.prop5,
        };
        *slot = value.into();
    }

    ////////////////////////////////////////////////////////////////////////////
    //
    //  cleaned
    //
    //  Returns a copy with trailing whitespace and newlines removed from
    //  every field.  This is the form that gets written to disk.
    //
    ////////////////////////////////////////////////////////////////////////////

    pub fn cleaned(&self) -> FolderInfo {
        let mut out = FolderInfo::default();
        for field in FolderField::ALL {
            out.set(field, clean_text(self.get(field)));
        }
        out
    }

    /// True when no field would be written.  Uses the writer's cleaning
    /// rule, so other Unicode whitespace still counts as content.
    pub fn is_empty(&self) -> bool {
        FolderField::ALL.iter().all(|&f| clean_text(self.get(f)).is_empty())
    }
}
