//! Static copy and catalogue data rendered by the pages.

pub struct Stat {
    pub value: u32,
    pub suffix: &'static str,
    pub label: &'static str,
}

pub const STATS: [Stat; 4] = [
    Stat { value: 5_000, suffix: "+", label: "Students placed" },
    Stat { value: 250, suffix: "+", label: "Partner universities" },
    Stat { value: 98, suffix: "%", label: "Visa success rate" },
    Stat { value: 12, suffix: "", label: "Years of guidance" },
];

pub struct Service {
    pub icon: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
}

pub const SERVICES: [Service; 6] = [
    Service { icon: "🎓", title: "University selection", summary: "Shortlists matched to your grades, budget and career goals." },
    Service { icon: "📝", title: "Application support", summary: "Statements of purpose, references and deadlines handled with you." },
    Service { icon: "🛂", title: "Visa guidance", summary: "Document checklists, mock interviews and filing support." },
    Service { icon: "💰", title: "Scholarships", summary: "Funding searches and applications for merit and need-based awards." },
    Service { icon: "✈️", title: "Pre-departure", summary: "Accommodation, travel and orientation before you fly." },
    Service { icon: "🗣️", title: "Test preparation", summary: "IELTS, TOEFL, GRE and GMAT coaching with mock exams." },
];

pub struct Country {
    pub slug: &'static str,
    pub name: &'static str,
    pub flag: &'static str,
    pub tagline: &'static str,
    pub universities: u32,
    pub intakes: &'static str,
    pub highlights: &'static [&'static str],
}

pub const COUNTRIES: [Country; 6] = [
    Country {
        slug: "usa",
        name: "United States",
        flag: "🇺🇸",
        tagline: "World-leading research universities and flexible majors.",
        universities: 4_000,
        intakes: "Fall, Spring",
        highlights: &["OPT work rights up to 3 years for STEM", "Liberal arts and research pathways", "Large scholarship pool"],
    },
    Country {
        slug: "uk",
        name: "United Kingdom",
        flag: "🇬🇧",
        tagline: "Shorter degrees with centuries of academic heritage.",
        universities: 160,
        intakes: "September, January",
        highlights: &["One-year master's programmes", "Graduate route visa", "Russell Group universities"],
    },
    Country {
        slug: "canada",
        name: "Canada",
        flag: "🇨🇦",
        tagline: "Welcoming communities and clear routes to residency.",
        universities: 100,
        intakes: "September, January, May",
        highlights: &["Post-graduation work permit", "Co-op programmes", "Affordable tuition"],
    },
    Country {
        slug: "australia",
        name: "Australia",
        flag: "🇦🇺",
        tagline: "High quality of life with strong industry links.",
        universities: 43,
        intakes: "February, July",
        highlights: &["Part-time work during study", "Temporary graduate visa", "Group of Eight universities"],
    },
    Country {
        slug: "germany",
        name: "Germany",
        flag: "🇩🇪",
        tagline: "Tuition-free public universities and engineering excellence.",
        universities: 400,
        intakes: "Winter, Summer",
        highlights: &["Low or no tuition fees", "18-month job seeker visa", "English-taught master's"],
    },
    Country {
        slug: "new-zealand",
        name: "New Zealand",
        flag: "🇳🇿",
        tagline: "Safe, scenic and practical teaching.",
        universities: 8,
        intakes: "February, July",
        highlights: &["All universities in global top 3%", "Post-study work visa", "Research-led teaching"],
    },
];

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GalleryCategory {
    Campus,
    Events,
    Students,
}

impl GalleryCategory {
    pub const ALL: [GalleryCategory; 3] = [Self::Campus, Self::Events, Self::Students];

    pub fn label(self) -> &'static str {
        match self {
            Self::Campus => "Campus",
            Self::Events => "Events",
            Self::Students => "Students",
        }
    }
}

pub struct GalleryItem {
    pub src: &'static str,
    pub caption: &'static str,
    pub category: GalleryCategory,
}

pub const GALLERY: [GalleryItem; 9] = [
    GalleryItem { src: "/gallery/oxford.jpg", caption: "Autumn in Oxford", category: GalleryCategory::Campus },
    GalleryItem { src: "/gallery/toronto-fair.jpg", caption: "Toronto education fair", category: GalleryCategory::Events },
    GalleryItem { src: "/gallery/melbourne-grads.jpg", caption: "Graduation day in Melbourne", category: GalleryCategory::Students },
    GalleryItem { src: "/gallery/mit.jpg", caption: "MIT main campus", category: GalleryCategory::Campus },
    GalleryItem { src: "/gallery/visa-workshop.jpg", caption: "Visa workshop", category: GalleryCategory::Events },
    GalleryItem { src: "/gallery/berlin-cohort.jpg", caption: "Berlin engineering cohort", category: GalleryCategory::Students },
    GalleryItem { src: "/gallery/auckland.jpg", caption: "University of Auckland", category: GalleryCategory::Campus },
    GalleryItem { src: "/gallery/scholarship-night.jpg", caption: "Scholarship awards night", category: GalleryCategory::Events },
    GalleryItem { src: "/gallery/london-meetup.jpg", caption: "Alumni meetup in London", category: GalleryCategory::Students },
];

pub fn gallery_items(filter: Option<GalleryCategory>) -> Vec<&'static GalleryItem> {
    GALLERY
        .iter()
        .filter(|item| filter.map_or(true, |category| item.category == category))
        .collect()
}

pub struct BlogPost {
    pub slug: &'static str,
    pub title: &'static str,
    pub excerpt: &'static str,
    pub category: &'static str,
    pub date: &'static str,
    pub read_minutes: u32,
}

pub const BLOG_POSTS: [BlogPost; 4] = [
    BlogPost {
        slug: "choosing-a-destination",
        title: "How to choose your study destination",
        excerpt: "Cost of living, work rights and course length matter as much as rankings.",
        category: "Guides",
        date: "2024-09-12",
        read_minutes: 6,
    },
    BlogPost {
        slug: "sop-that-stands-out",
        title: "Writing a statement of purpose that stands out",
        excerpt: "Admissions teams read thousands of essays. Here is what they remember.",
        category: "Applications",
        date: "2024-08-28",
        read_minutes: 8,
    },
    BlogPost {
        slug: "student-visa-checklist",
        title: "The student visa checklist",
        excerpt: "Financial proof, offer letters and health cover explained country by country.",
        category: "Visas",
        date: "2024-08-02",
        read_minutes: 5,
    },
    BlogPost {
        slug: "scholarships-2025",
        title: "Scholarships opening for 2025 intakes",
        excerpt: "Merit awards and government scholarships with deadlines in the next six months.",
        category: "Funding",
        date: "2024-07-15",
        read_minutes: 4,
    },
];

pub struct Testimonial {
    pub name: &'static str,
    pub destination: &'static str,
    pub quote: &'static str,
}

pub const TESTIMONIALS: [Testimonial; 3] = [
    Testimonial { name: "Priya S.", destination: "MSc Data Science, University of Toronto", quote: "They helped me find a programme I had never heard of and it was a perfect fit." },
    Testimonial { name: "Daniel K.", destination: "MBA, Melbourne Business School", quote: "The visa preparation sessions made the interview feel routine." },
    Testimonial { name: "Aisha M.", destination: "BEng, TU Munich", quote: "I study tuition-free in Germany because they pointed me in the right direction." },
];

pub struct TeamMember {
    pub name: &'static str,
    pub role: &'static str,
}

pub const TEAM: [TeamMember; 4] = [
    TeamMember { name: "Elena Park", role: "Founder & Lead Counsellor" },
    TeamMember { name: "Marcus Obi", role: "Visa Specialist" },
    TeamMember { name: "Sofia Reyes", role: "Admissions Advisor" },
    TeamMember { name: "Hamid Rahimi", role: "Test Preparation Coach" },
];

pub type SelectOption = (&'static str, &'static str);

pub const EDUCATION_LEVELS: [SelectOption; 5] = [
    ("high-school", "High school"),
    ("diploma", "Diploma"),
    ("bachelor", "Bachelor's degree"),
    ("master", "Master's degree"),
    ("phd", "Doctorate"),
];

pub const PROGRAMS: [SelectOption; 6] = [
    ("engineering", "Engineering"),
    ("computer-science", "Computer science"),
    ("business", "Business"),
    ("mba", "MBA"),
    ("health", "Health sciences"),
    ("arts", "Arts & humanities"),
];

pub const CONTACT_PREFERENCES: [SelectOption; 3] = [
    ("email", "Email"),
    ("phone", "Phone"),
    ("whatsapp", "WhatsApp"),
];

pub const SOURCES: [SelectOption; 5] = [
    ("search", "Search engine"),
    ("social", "Social media"),
    ("friend", "Friend or family"),
    ("fair", "Education fair"),
    ("other", "Other"),
];

pub fn country_options() -> Vec<SelectOption> {
    COUNTRIES.iter().map(|country| (country.slug, country.name)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gallery_filter_narrows_by_category() {
        assert_eq!(gallery_items(None).len(), GALLERY.len());
        let events = gallery_items(Some(GalleryCategory::Events));
        assert_eq!(events.len(), 3);
        assert!(events.iter().all(|item| item.category == GalleryCategory::Events));
    }

    #[test]
    fn country_options_use_inquiry_slugs() {
        let options = country_options();
        assert!(options.iter().any(|(value, _)| *value == "usa"));
        assert_eq!(options.len(), COUNTRIES.len());
    }
}
