//! Reply catalog: static menu-tree content
//!
//! Pure lookups over read-only data. The catalog is exhaustive over
//! `MenuNode`, so an unknown node cannot be queried at runtime.

use crate::domain::{Card, CardAction, Choice, MenuNode, Reply};

pub const WELCOME_TEXT: &str = "Mabuhay! Welcome to Philippine Paradise Tours! \u{1F334}\n\nWe specialize in creating unforgettable travel experiences across the beautiful islands of the Philippines. How can I help you plan your dream vacation?";

pub const MAIN_MENU_PROMPT: &str =
    "Please select an option to start planning your Philippine adventure:";

pub const TOUR_PACKAGES_PROMPT: &str =
    "Discover our amazing tour packages! Where would you like to explore?";

pub const BOOK_TOUR_PROMPT: &str = "To book a tour, please provide:\n1. Your preferred destination\n2. Number of travelers\n3. Preferred dates\n\nOr you can call our booking hotline: +63 2 1234 5678\n\nWould you like to see our available packages first?";

pub const CONTACT_US_PROMPT: &str = "Contact Philippine Paradise Tours:\n\n\u{1F4DE} Phone: +63 2 1234 5678\n\u{1F4E7} Email: info@philippineparadise.com\n\u{1F4CD} Office: 123 Makati Avenue, Makati City\n\nOperating Hours:\nMonday to Friday: 9AM - 6PM\nSaturday: 9AM - 3PM\n\nWould you like to return to the main menu?";

pub const ATTACHMENT_RECEIVED_TEXT: &str =
    "I received your attachment! Please select an option from the menu:";

pub const APOLOGY_TEXT: &str = "I apologize, but I'm having trouble processing your request right now. Please select an option from the menu:";

const BORACAY_PACKAGES_TEXT: &str = "Boracay Island Packages:\n\n1. White Beach Getaway (3D2N)\n- Beachfront accommodation\n- Island hopping\n- Sunset sailing\n\n2. Adventure Package (4D3N)\n- All activities from Getaway package\n- Parasailing\n- Scuba diving\n\nWould you like to book any of these packages?";

const CEBU_ADVENTURES_TEXT: &str = "Cebu Adventure Packages:\n\n1. Whale Shark Encounter\n- Swimming with whale sharks\n- Tumalog Falls visit\n- Oslob tour\n\n2. Canyoneering Adventure\n- Badian canyoneering\n- Kawasan Falls\n- Lunch included\n\nWhich adventure would you like to book?";

/// The three top-level menu choices
pub fn main_menu_choices() -> Vec<Choice> {
    vec![
        Choice::new("Tour Packages", "TOUR_PACKAGES"),
        Choice::new("Book a Tour", "BOOK_TOUR"),
        Choice::new("Contact Us", "CONTACT_US"),
    ]
}

fn back_to_menu() -> Choice {
    Choice::new("Back to Menu", "MAIN_MENU")
}

/// Quick-reply choices offered at a given menu node
pub fn choices_for(node: MenuNode) -> Vec<Choice> {
    match node {
        MenuNode::MainMenu => main_menu_choices(),
        MenuNode::TourPackages => vec![
            Choice::new("Palawan Tours", "PALAWAN_TOURS"),
            Choice::new("Boracay Packages", "BORACAY_PACKAGES"),
            Choice::new("Cebu Adventures", "CEBU_ADVENTURES"),
            back_to_menu(),
        ],
        MenuNode::BookTour => vec![
            Choice::new("View Packages", "TOUR_PACKAGES"),
            back_to_menu(),
        ],
        MenuNode::ContactUs => vec![back_to_menu()],
    }
}

/// Static prompt for a menu node
pub fn node_prompt(node: MenuNode) -> Reply {
    let text = match node {
        MenuNode::MainMenu => MAIN_MENU_PROMPT,
        MenuNode::TourPackages => TOUR_PACKAGES_PROMPT,
        MenuNode::BookTour => BOOK_TOUR_PROMPT,
        MenuNode::ContactUs => CONTACT_US_PROMPT,
    };
    Reply::text_with_choices(text, choices_for(node))
}

/// Greeting sent on GET_STARTED and as the unrecognized-input fallback
pub fn welcome() -> Reply {
    Reply::text_with_choices(WELCOME_TEXT, main_menu_choices())
}

/// Fixed acknowledgement for attachment-only messages
pub fn attachment_received() -> Reply {
    Reply::text_with_choices(ATTACHMENT_RECEIVED_TEXT, main_menu_choices())
}

/// Fallback when the completion delegate fails or times out
pub fn apology() -> Reply {
    Reply::text_with_choices(APOLOGY_TEXT, main_menu_choices())
}

/// Wrap delegate-generated text as a reply with the main-menu choices
pub fn delegate_reply(text: String) -> Reply {
    Reply::Text {
        text,
        choices: main_menu_choices(),
    }
}

/// Destination pages reachable from the tour-packages menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Palawan,
    Boracay,
    Cebu,
}

/// Page content for a destination
pub fn destination_page(destination: Destination) -> Reply {
    match destination {
        Destination::Palawan => Reply::Cards {
            items: vec![
                Card {
                    title: "El Nido Island Hopping".to_string(),
                    subtitle: Some("Explore the stunning lagoons and beaches of El Nido".to_string()),
                    image_url: Some("https://example.com/elnido.jpg".to_string()),
                    actions: vec![
                        CardAction::Link {
                            title: "View Details".to_string(),
                            url: "https://example.com/elnido-tour".to_string(),
                        },
                        CardAction::Postback {
                            title: "Book Now".to_string(),
                            payload: "BOOK_ELNIDO".to_string(),
                        },
                    ],
                },
                Card {
                    title: "Underground River Tour".to_string(),
                    subtitle: Some(
                        "Discover the UNESCO World Heritage underground river".to_string(),
                    ),
                    image_url: Some("https://example.com/underground-river.jpg".to_string()),
                    actions: vec![
                        CardAction::Link {
                            title: "View Details".to_string(),
                            url: "https://example.com/underground-river-tour".to_string(),
                        },
                        CardAction::Postback {
                            title: "Book Now".to_string(),
                            payload: "BOOK_UNDERGROUND_RIVER".to_string(),
                        },
                    ],
                },
            ],
        },
        Destination::Boracay => Reply::text_with_choices(
            BORACAY_PACKAGES_TEXT,
            vec![
                Choice::new("Book White Beach", "BOOK_WHITE_BEACH"),
                Choice::new("Book Adventure", "BOOK_ADVENTURE"),
                back_to_menu(),
            ],
        ),
        Destination::Cebu => Reply::text_with_choices(
            CEBU_ADVENTURES_TEXT,
            vec![
                Choice::new("Whale Shark Tour", "BOOK_WHALE_SHARK"),
                Choice::new("Canyoneering", "BOOK_CANYONEERING"),
                back_to_menu(),
            ],
        ),
    }
}

/// Confirmation for a leaf booking payload; does not change state
pub fn booking_confirmation(tour_name: &str) -> Reply {
    Reply::text_with_choices(
        format!(
            "Salamat! We've noted your booking request for {}. Our team will contact you shortly to confirm dates, travelers, and payment.",
            tour_name
        ),
        vec![back_to_menu()],
    )
}

/// Keyword classification for free text at the main menu, in fixed priority
/// order; first match wins.
pub fn classify_keywords(text: &str) -> Option<MenuNode> {
    let text = text.to_lowercase();
    if text.contains("tour") || text.contains("package") {
        Some(MenuNode::TourPackages)
    } else if text.contains("book") || text.contains("reserve") {
        Some(MenuNode::BookTour)
    } else if text.contains("contact") || text.contains("help") {
        Some(MenuNode::ContactUs)
    } else {
        None
    }
}
