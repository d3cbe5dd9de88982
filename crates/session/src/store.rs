//! Owned registry of rooms

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

use crate::room::{generate_code, normalize_code, ClientId, Room, RoomStatus, RoomSummary, Seat};

/// Draws per code length before moving to a longer code.
const CODE_ATTEMPTS: usize = 16;

/// Every active room, keyed by canonical code.
///
/// The store is an ordinary value owned by whoever coordinates the rooms, so it
/// can be built fresh in tests and replaced by another backing later.
#[derive(Debug)]
pub struct RoomStore<R = StdRng> {
    rooms: HashMap<String, Room>,
    rng: R,
    code_len: usize,
}

impl RoomStore<StdRng> {
    pub fn new(code_len: usize) -> Self {
        Self::with_rng(StdRng::from_entropy(), code_len)
    }
}

impl<R: Rng> RoomStore<R> {
    pub fn with_rng(rng: R, code_len: usize) -> Self {
        Self {
            rooms: HashMap::new(),
            rng,
            code_len: code_len.max(1),
        }
    }

    /// Allocate a waiting room under a fresh code and return it.
    ///
    /// When random draws keep colliding the code grows by one character, so a
    /// crowded short code space never stalls the caller.
    pub fn create(&mut self, name: String, host: Seat) -> &Room {
        let mut len = self.code_len;
        let code = 'search: loop {
            for _ in 0..CODE_ATTEMPTS {
                let candidate = generate_code(&mut self.rng, len);
                if !self.rooms.contains_key(&candidate) {
                    break 'search candidate;
                }
            }
            len += 1;
        };
        self.rooms
            .entry(code.clone())
            .or_insert_with(|| Room::new(code, name, host))
    }

    pub fn get(&self, code: &str) -> Option<&Room> {
        self.rooms.get(&normalize_code(code))
    }

    pub fn get_mut(&mut self, code: &str) -> Option<&mut Room> {
        self.rooms.get_mut(&normalize_code(code))
    }

    pub fn remove(&mut self, code: &str) -> Option<Room> {
        self.rooms.remove(&normalize_code(code))
    }

    /// Codes of every room `client` is seated in.
    pub fn rooms_of(&self, client: ClientId) -> Vec<String> {
        let mut codes: Vec<String> = self
            .rooms
            .values()
            .filter(|r| r.has(client))
            .map(|r| r.id.clone())
            .collect();
        codes.sort();
        codes
    }

    /// Rooms still waiting for a guest, ordered by code.
    pub fn open_rooms(&self) -> Vec<RoomSummary> {
        let mut open: Vec<RoomSummary> = self
            .rooms
            .values()
            .filter(|r| r.status == RoomStatus::Waiting)
            .map(Room::summary)
            .collect();
        open.sort_by(|a, b| a.id.cmp(&b.id));
        open
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seat(name: &str) -> Seat {
        Seat {
            id: ClientId::new(),
            name: name.to_string(),
        }
    }

    #[test]
    fn codes_are_unique_and_case_insensitive() {
        let mut store = RoomStore::with_rng(StdRng::seed_from_u64(5), 4);
        let a = store.create("a".into(), seat("ann")).id.clone();
        let b = store.create("b".into(), seat("bob")).id.clone();
        assert_ne!(a, b);
        assert_eq!(a.len(), 4);
        assert!(store.get(&a.to_lowercase()).is_some());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn full_code_space_grows_codes() {
        // 32 one-character codes exist; keep creating past that
        let mut store = RoomStore::with_rng(StdRng::seed_from_u64(9), 1);
        for i in 0..40 {
            store.create(format!("room {i}"), seat("ann"));
        }
        assert_eq!(store.len(), 40);
        assert!(store.open_rooms().iter().any(|r| r.id.len() > 1));
    }

    #[test]
    fn open_rooms_lists_only_waiting() {
        let mut store = RoomStore::with_rng(StdRng::seed_from_u64(1), 5);
        let a = store.create("a".into(), seat("ann")).id.clone();
        let host = seat("bob");
        let host_id = host.id;
        let b = store.create("b".into(), host).id.clone();
        store.get_mut(&b).unwrap().status = RoomStatus::Playing;

        let open = store.open_rooms();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].id, a);
        assert_eq!(store.rooms_of(host_id), vec![b.clone()]);

        assert!(store.remove(&b).is_some());
        assert!(store.rooms_of(host_id).is_empty());
    }
}
