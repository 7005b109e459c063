//! Random mix titles such as "Neon Road Trip".

use rand::seq::SliceRandom;
use rand::Rng;

pub const DESCRIPTIVE_WORDS: &[&str] = &[
    "Awesome", "Epic", "Chill", "Crazy", "Ultimate", "Perfect", "Legendary", "Amazing", "Wild",
    "Cool", "Rad", "Sweet", "Groovy", "Funky", "Classic", "Retro", "Modern", "Electric",
    "Acoustic", "Midnight", "Sunset", "Neon", "Golden", "Silver", "Diamond", "Fire", "Ice",
    "Thunder", "Lightning", "Starlight", "Moonbeam", "Sunshine", "Rainbow", "Girls", "Guys",
    "Friends", "Solo", "Duo", "Crew", "Squad", "Gang", "Club", "VIP", "Secret", "Hidden", "Lost",
    "Found", "Broken", "Fixed", "New", "Old", "Fresh", "Vintage",
];

pub const EVENT_WORDS: &[&str] = &[
    "Road Trip", "Party", "Hangout", "Sleepover", "Study Session", "Workout", "Dance",
    "Chill Session", "Beach Day", "Mountain Trip", "City Walk", "Night Out", "Date Night",
    "Game Night", "Movie Night", "Cook Out", "Barbecue", "Picnic", "Festival", "Concert",
    "Wedding", "Birthday", "Celebration", "Graduation", "Vacation", "Weekend", "Holiday",
    "Summer Vibes", "Winter Nights", "Spring Break", "Fall Feels", "Memories", "Adventures",
    "Journey", "Escape", "Getaway", "Retreat", "Experience", "Moments", "Times", "Days", "Nights",
    "Hours", "Minutes", "Seconds", "Playlist", "Mix", "Collection", "Anthology", "Chronicles",
    "Stories", "Tales", "Dreams", "Wishes", "Hopes", "Love", "Life",
];

/// Pick one descriptive word and one event word.
pub fn generate_title<R: Rng + ?Sized>(rng: &mut R) -> String {
    let descriptive = DESCRIPTIVE_WORDS.choose(rng).copied().unwrap_or("Ultimate");
    let event = EVENT_WORDS.choose(rng).copied().unwrap_or("Mix");
    format!("{descriptive} {event}")
}

/// [`generate_title`] with the thread-local generator.
#[must_use]
pub fn random_title() -> String {
    generate_title(&mut rand::thread_rng())
}
