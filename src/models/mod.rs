// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Attraction, BoundingBox, BreakTime, Conditions, District, Hotel, Hours, Location,
    PointOfInterest, Price, PriceRange, RecommendedTime, Restaurant, Room, Span, Tier, Transport,
    WeatherForecast,
};
pub use requests::{
    ActivitySetting, AttractionRequest, Budget, DiningRequest, DiningSlot, HotelRequest,
    TripPreferences, TripRequest,
};
pub use responses::{
    ActivityBlock, ActivityKind, BlockPeriod, Candidate, DailyPlan, DiningPick, RoomChoice,
    TripPlan, WeatherAdvice,
};
