//! Static page copy: panel descriptors and the arrays handed to the
//! presentational sections.  Nothing here changes at runtime.

use super::panels::{PanelAlign, PanelDescriptor};

pub const BRAND_NAME: &str = "Teachmint X";
pub const PAGE_TITLE: &str = "Click X | Active AI Learning";

/// Hero text overlays, in progress order.  Fade windows never overlap.
pub static PANELS: &[PanelDescriptor] = &[
    PanelDescriptor {
        id: "engineering",
        align: PanelAlign::Left,
        fade_in: [0.12, 0.16],
        fade_out: [0.28, 0.32],
        anchor: 0.22,
        title: "Turn every lesson into active dialogues",
        body: None,
        bullets: &[],
        cta: false,
    },
    PanelDescriptor {
        id: "ai-desk",
        align: PanelAlign::Right,
        fade_in: [0.32, 0.36],
        fade_out: [0.5, 0.54],
        anchor: 0.26,
        title: "Bring AI to Every Desk for Active Learning",
        body: None,
        bullets: &[],
        cta: false,
    },
    PanelDescriptor {
        id: "engagement",
        align: PanelAlign::Left,
        fade_in: [0.54, 0.58],
        fade_out: [0.7, 0.74],
        anchor: 0.30,
        title: "Transforming Classroom Engagement with Click X",
        body: Some(
            "From distraction to focused engagement. Built for smart, AI-powered classrooms with studio-level presence.",
        ),
        bullets: &[],
        cta: false,
    },
    PanelDescriptor {
        id: "cta",
        align: PanelAlign::Center,
        fade_in: [0.76, 0.82],
        fade_out: [0.98, 1.0],
        anchor: 0.52,
        title: "",
        body: None,
        bullets: &[],
        cta: true,
    },
];

pub const HERO_CTA_PRIMARY: &str = "Experience Click X";
pub const HERO_CTA_SECONDARY: &str = "Get Started";

// ── header ────────────────────────────────────────────────────

pub const NAV_ITEMS: &[&str] = &["Devices ▾", "Solutions ▾", "Support ▾", "Partner ▾"];
pub const NAV_LOGIN: &str = "Login/Sign up";
pub const NAV_SHOP: &str = "Shop Now";

// ── features grid ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct FeatureCard {
    pub title: &'static str,
}

pub const FEATURES_HEADING: &str = "Why Click X is the best way to elevate every classroom.";
pub const FEATURES_LINK: &str = "Shop Click X →";

pub static FEATURES: &[FeatureCard] = &[
    FeatureCard {
        title: "Two-Way Interactive Learning.",
    },
    FeatureCard {
        title: "100% Focused Participation.",
    },
    FeatureCard {
        title: "AI Interaction for Every Student.",
    },
    FeatureCard {
        title: "From Distraction to Focused Engagement.",
    },
    FeatureCard {
        title: "Built for Smart, AI-Powered Classrooms.",
    },
];

// ── product slider ────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct SlideCard {
    pub title: &'static str,
}

pub const SLIDER_HEADING: &str = "Get to know Click X.";
/// Horizontal distance one arrow press scrolls the slider, in CSS pixels.
pub const SLIDER_STEP_PX: f64 = 360.0;
/// Width of one slider card, in CSS pixels.
pub const SLIDE_CARD_PX: f64 = 280.0;

pub static SLIDES: &[SlideCard] = &[
    SlideCard {
        title: "Two-Way Interactive Learning.",
    },
    SlideCard {
        title: "Built for Smart, AI-Powered Classrooms.",
    },
    SlideCard {
        title: "100% Focused Participation.",
    },
    SlideCard {
        title: "AI Interaction for Every Student.",
    },
    SlideCard {
        title: "From Distraction to Focused Engagement.",
    },
    SlideCard {
        title: "Real-Time Understanding.",
    },
    SlideCard {
        title: "Instant Class Momentum.",
    },
    SlideCard {
        title: "Designed for Every Desk.",
    },
];

// ── FAQ ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct FaqItem {
    pub question: &'static str,
    pub answer: &'static str,
}

pub const FAQ_HEADING: &str = "Frequently Asked Questions";
pub const FAQ_INTRO: &str =
    "Everything you need to know about Click X and how it works with Teachmint X.";

pub static FAQ_ITEMS: &[FaqItem] = &[
    FaqItem {
        question: "What is Click X?",
        answer: "Click X is a student response clicker that allows every student to interact with lessons in real time, ensuring full participation and instant performance insights.",
    },
    FaqItem {
        question: "Does Click X need internet?",
        answer: "No, internet is not required. Click X connects seamlessly with the base station integrated with Teachmint X.",
    },
    FaqItem {
        question: "How does Click X help teachers?",
        answer: "Teachers can launch quizzes, polls, and assessments, and get student-wise, real-time insights to track understanding and improve lessons.",
    },
    FaqItem {
        question: "Can Click X be used for all types of lessons?",
        answer: "Yes! It works for live quizzes, concept checks, exit tickets, polls, revision sessions, and exam preparation.",
    },
    FaqItem {
        question: "Do teachers get instant reports?",
        answer: "Yes, all student responses are captured instantly and displayed on the Teachmint X panel for real-time performance tracking.",
    },
    FaqItem {
        question: "Does Click X work with personal devices?",
        answer: "No, Click X is a dedicated device that works seamlessly with Teachmint X, keeping students focused and distraction-free.",
    },
];

// ── CTA band ──────────────────────────────────────────────────

pub const CTA_HEADING: &str = "Precision-built for the modern classroom";
pub const CTA_BODY: &str = "Click X pairs with AI-grade intelligence. From instant response capture to adaptive insights, every lesson becomes a living conversation.";

// ── footer ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct FooterSection {
    pub title: &'static str,
    pub links: &'static [&'static str],
}

#[derive(Debug, Clone, Copy)]
pub struct ContactBlock {
    pub label: &'static str,
    pub lines: &'static [&'static str],
}

#[derive(Debug, Clone, Copy)]
pub struct SocialLink {
    pub name: &'static str,
}

pub static FOOTER_SECTIONS: &[FooterSection] = &[
    FooterSection {
        title: "Company",
        links: &["About Us", "Events", "Careers", "Privacy policy"],
    },
    FooterSection {
        title: "Resources",
        links: &["Blog", "Product Policy", "Brochure", "Warranty Policy"],
    },
];

pub const CONTACT_HEADING: &str = "Contact";

pub static CONTACTS: &[ContactBlock] = &[
    ContactBlock {
        label: "Bengaluru",
        lines: &[
            "5th Floor, North Wing,",
            "SJR The Hub, Sarjapur Main",
            "Road, Bengaluru - 560103,",
            "Karnataka, India",
        ],
    },
    ContactBlock {
        label: "Manila",
        lines: &[
            "11th Floor, Insular Life Building,",
            "6781 Ayala Avenue, Corner",
            "Paseo de Roxas, Makati, Metro",
            "Manila, Philippines",
        ],
    },
    ContactBlock {
        label: "Singapore",
        lines: &["9 Raffles Place,", "#24-01 Republic Plaza,", "Singapore - 048619"],
    },
    ContactBlock {
        label: "E-mail",
        lines: &["support@teachmint.com"],
    },
    ContactBlock {
        label: "Phone",
        lines: &["080-35073710", "(IST 8 AM – 8 PM Everyday)"],
    },
];

pub const COPYRIGHT: &str = "©Copyright 2026, Teachmint Technologies Pvt. Ltd.";

pub static SOCIAL_LINKS: &[SocialLink] = &[
    SocialLink {
        name: "LinkedIn",
    },
    SocialLink {
        name: "Facebook",
    },
    SocialLink {
        name: "Instagram",
    },
    SocialLink {
        name: "Twitter",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_windows_are_ordered_and_disjoint() {
        for p in PANELS {
            assert!(p.fade_in[0] <= p.fade_in[1], "{}", p.id);
            assert!(p.fade_in[1] <= p.fade_out[0], "{}", p.id);
            assert!(p.fade_out[0] <= p.fade_out[1], "{}", p.id);
            assert!((0.0..=1.0).contains(&p.fade_out[1]), "{}", p.id);
        }
        for pair in PANELS.windows(2) {
            assert!(pair[0].fade_out[1] <= pair[1].fade_in[0]);
        }
    }

    #[test]
    fn only_the_last_panel_carries_the_cta() {
        let ctas: Vec<_> = PANELS.iter().filter(|p| p.cta).map(|p| p.id).collect();
        assert_eq!(ctas, vec!["cta"]);
    }
}
