//! Raw touch input value types.

/// Identifier of one active contact, stable while the finger stays down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ContactId(pub u32);

/// Phase of a raw touch event delivered by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// One active contact as reported by the host for a single event.
///
/// Client and page coordinates may go negative when the surface is scrolled,
/// so every axis is signed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Contact {
    pub id: ContactId,
    pub screen_x: i32,
    pub screen_y: i32,
    pub client_x: i32,
    pub client_y: i32,
    pub page_x: i32,
    pub page_y: i32,
}

/// Immutable snapshot of a contact's position at a given instant.
///
/// A `Sample` is a plain `Copy` value with no interior mutability; once
/// created it is never written through, which makes it safe to embed in
/// emitted gesture payloads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sample {
    pub screen_x: i32,
    pub screen_y: i32,
    pub client_x: i32,
    pub client_y: i32,
    pub page_x: i32,
    pub page_y: i32,
    pub time_stamp: u64,
}

impl Sample {
    pub fn of(contact: &Contact, time_stamp: u64) -> Self {
        Self {
            screen_x: contact.screen_x,
            screen_y: contact.screen_y,
            client_x: contact.client_x,
            client_y: contact.client_y,
            page_x: contact.page_x,
            page_y: contact.page_y,
            time_stamp,
        }
    }
}
