//! Static copy for the public pages (hero, services, contact, footer).

pub const COMPANY_NAME: &str = "Thavma Solutions";
pub const TAGLINE: &str = "Where Innovation Meets Interior Elegance";

pub const HERO_PARAGRAPHS: [&str; 3] = [
    "We specialize in crafting high-precision MRI room interiors, including airtight \
     MRI door fittings and ongoing maintenance solutions that meet safety and design standards.",
    "Our services also span to residential and commercial interiors, creating warm, \
     calming, and intelligent spaces that inspire creativity and wellness.",
    "Located in Ernakulam, Kerala – Serving Clients Across India & Globally",
];

pub struct Service {
    pub title: &'static str,
    pub description: &'static str,
}

pub const SERVICES_HEADING: &str = "What We Do";
pub const SERVICES_SUBTITLE: &str =
    "Our comprehensive range of services combines medical precision with aesthetic excellence";

pub const SERVICES: [Service; 4] = [
    Service {
        title: "MRI Room Interior Design",
        description:
            "Ergonomic, RF-shielded designs to support medical safety and aesthetic tranquility.",
    },
    Service {
        title: "MRI Room Maintenance",
        description:
            "Complete care for MRI rooms, including preventive checks and emergency fixes.",
    },
    Service {
        title: "MRI Door Air-Tight Fittings",
        description:
            "Specialized sealing and magnetic door solutions to maintain safe MRI environments.",
    },
    Service {
        title: "Residential & Commercial Interiors",
        description:
            "We design warm and elegant interiors that elevate your lifestyle and workspace.",
    },
];

pub const GALLERY_HEADING: &str = "Project Gallery";
pub const GALLERY_SUBTITLE: &str =
    "Explore our completed projects showcasing innovation and elegance";

pub const CONTACT_HEADING: &str = "Contact Us";
pub const CONTACT_SUBTITLE: &str = "Get in touch with us to discuss your next project";

pub const OFFICES: [&[&str]; 2] = [
    &[
        "Ernakulam, Kerala, India, 682511",
        "We are proudly serving clients across India and globally.",
    ],
    &[
        "H.No :5-90/6/78/A/1",
        "Plot No: 78, Survey No. 6/Part,",
        "Darga Khalij Khan Village, Kismatpur,",
        "Rajendra Nagar, Hyderbad - 500 030",
    ],
];

pub const PHONE: &str = "+91 875 458 9759";
pub const EMAILS: [&str; 2] = ["robert.kalathil@gmail.com", "thavmasolutions1@gmail.com"];

pub const WHATSAPP_NUMBER: &str = "918754589759";
pub const WHATSAPP_GREETING: &str = "Hi, I'm visiting your website and want to chat!";

pub const COPYRIGHT: &str = "© 2025 Thavma Solutions. All rights reserved.";

/// Click-to-chat link with the greeting pre-filled
pub fn whatsapp_link() -> String {
    format!(
        "https://wa.me/{}?text={}",
        WHATSAPP_NUMBER,
        urlencoding::encode(WHATSAPP_GREETING)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whatsapp_link_is_encoded() {
        let link = whatsapp_link();
        assert!(link.starts_with("https://wa.me/918754589759?text="));
        assert!(link.contains("Hi%2C%20I%27m%20visiting"));
        assert!(!link.contains(' '));
    }
}
