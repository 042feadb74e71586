// Job board plumbing around the matching core: jobs, applications, admin overview.
// Applications take their similarity score from matching::scorer exactly once.

pub mod applications;
pub mod handlers;
pub mod jobs;
pub mod overview;
pub mod pagination;
