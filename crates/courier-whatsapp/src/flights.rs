// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Demo flight catalog and its confirmation template.

use courier_core::types::TemplateMessage;
use serde::Serialize;
use serde_json::json;

/// Pre-approved template used for ticket confirmations.
pub const CONFIRMATION_TEMPLATE: &str = "sample_flight_confirmation";

const CONFIRMATION_PDF: &str =
    "https://github.com/marcelooliveira/flight-confirmation-python/raw/main/FlightConfirmation.pdf";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flight {
    pub flight_id: u32,
    pub document: &'static str,
    pub thumbnail: &'static str,
    pub origin: &'static str,
    pub destination: &'static str,
    pub time: &'static str,
}

const FLIGHTS: [Flight; 4] = [
    Flight {
        flight_id: 1,
        document: CONFIRMATION_PDF,
        thumbnail: "https://upload.wikimedia.org/wikipedia/commons/thumb/f/f8/Aerial_view_of_Bajra_Sandhi_Monument_Denpasar_Bali_Indonesia.jpg/250px-Aerial_view_of_Bajra_Sandhi_Monument_Denpasar_Bali_Indonesia.jpg",
        origin: "Singapore (SIN)",
        destination: "Denpasar (DPS)",
        time: "June 24, 2022 - 8:25 PM",
    },
    Flight {
        flight_id: 2,
        document: CONFIRMATION_PDF,
        thumbnail: "https://upload.wikimedia.org/wikipedia/commons/thumb/7/75/Parliament_at_Sunset.JPG/275px-Parliament_at_Sunset.JPG",
        origin: "New York (JFK)",
        destination: "London (LHR)",
        time: "June 25, 2022 - 9:15 PM",
    },
    Flight {
        flight_id: 3,
        document: CONFIRMATION_PDF,
        thumbnail: "https://img.joomcdn.net/0fa94e173d565637e581144c6cd02ab67c27e23f_original.jpeg",
        origin: "Beijing (PEK)",
        destination: "Sydney (SYD)",
        time: "June 25, 2022 - 5:30 AM",
    },
    Flight {
        flight_id: 4,
        document: CONFIRMATION_PDF,
        thumbnail: "https://upload.wikimedia.org/wikipedia/commons/thumb/a/a5/Mouth_of_Miami_River_20100211.jpg/220px-Mouth_of_Miami_River_20100211.jpg",
        origin: "São Paulo (GRU)",
        destination: "Miami (MIA)",
        time: "June 25, 2022 - 9:25 AM",
    },
];

pub fn flights() -> &'static [Flight] {
    &FLIGHTS
}

pub fn find_flight(flight_id: u32) -> Option<&'static Flight> {
    FLIGHTS.iter().find(|f| f.flight_id == flight_id)
}

/// Confirmation template: the booking PDF as document header, then origin,
/// destination and departure time as body parameters.
pub fn flight_confirmation(flight: &Flight) -> TemplateMessage {
    TemplateMessage {
        name: CONFIRMATION_TEMPLATE.to_string(),
        language_code: "en_US".to_string(),
        components: vec![
            json!({
                "type": "header",
                "parameters": [{
                    "type": "document",
                    "document": {"filename": "FlightConfirmation.pdf", "link": flight.document}
                }]
            }),
            json!({
                "type": "body",
                "parameters": [
                    {"type": "text", "text": flight.origin},
                    {"type": "text", "text": flight.destination},
                    {"type": "text", "text": flight.time}
                ]
            }),
        ],
    }
}
