/// Mobile navigation drawer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

impl MenuState {
    pub fn toggled(self) -> Self {
        match self {
            MenuState::Closed => MenuState::Open,
            MenuState::Open => MenuState::Closed,
        }
    }

    pub fn is_open(self) -> bool {
        self == MenuState::Open
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessSection {
    Quick,
    Member,
    App,
}

impl ProcessSection {
    pub const ALL: [ProcessSection; 3] = [
        ProcessSection::Quick,
        ProcessSection::Member,
        ProcessSection::App,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ProcessSection::Quick => "Quick Registration",
            ProcessSection::Member => "Member Registration",
            ProcessSection::App => "Gym App",
        }
    }

    pub fn body(self) -> &'static str {
        match self {
            ProcessSection::Quick => "Streamlined registration process for quick member onboarding.",
            ProcessSection::Member => "Complete member profile creation and management system.",
            ProcessSection::App => "Mobile application for members to track their fitness journey.",
        }
    }
}

/// Accordion with at most one section expanded. Clicking the open one closes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Accordion {
    expanded: Option<ProcessSection>,
}

impl Accordion {
    pub fn toggled(self, section: ProcessSection) -> Self {
        Self {
            expanded: if self.expanded == Some(section) {
                None
            } else {
                Some(section)
            },
        }
    }

    pub fn expanded(self) -> Option<ProcessSection> {
        self.expanded
    }
}

pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
}

pub const FEATURES: [Feature; 6] = [
    Feature {
        title: "Members Management",
        description: "Streamlines the admin work around memberships, member profiles, attendance, payments and communication.",
    },
    Feature {
        title: "IVR System",
        description: "Automated phone menus that take routine calls off your front desk.",
    },
    Feature {
        title: "WhatsApp",
        description: "Reach members where they already are for reminders, renewals and offers.",
    },
    Feature {
        title: "BMI Integration",
        description: "Give every member a baseline body-composition measurement from day one.",
    },
    Feature {
        title: "Pay Roll Management",
        description: "Accurate, on-time staff payments without the spreadsheet.",
    },
    Feature {
        title: "Data Security",
        description: "OTP sign-in and IP restrictions keep member data where it belongs.",
    },
];

pub struct Contact {
    pub address: &'static str,
    pub phone: &'static str,
    pub email: &'static str,
    pub hours: [&'static str; 2],
}

pub const CONTACT: Contact = Contact {
    address: "123 Fitness Street, New York, NY 10001",
    phone: "+1 (555) 123-4567",
    email: "contact@t2g.com",
    hours: [
        "Monday - Friday: 6:00 AM - 10:00 PM",
        "Saturday - Sunday: 8:00 AM - 8:00 PM",
    ],
};
