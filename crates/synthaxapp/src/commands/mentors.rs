use super::helpers::{matches_query, position_by_id};
use super::Outcome;
use crate::error::Result;
use crate::model::{new_id, Mentor, MentorshipRequest, RequestStatus};
use crate::store::DataStore;
use chrono::{DateTime, Utc};

pub fn list<S: DataStore>(store: &mut S) -> Result<Vec<Mentor>> {
    store.mentors()
}

pub fn get<S: DataStore>(store: &mut S, mentor_id: &str) -> Result<Option<Mentor>> {
    Ok(store.mentors()?.into_iter().find(|m| m.id == mentor_id))
}

/// Requests addressed to the signed-in mentor.
pub fn requests_for_current_mentor<S: DataStore>(
    store: &mut S,
) -> Result<Vec<MentorshipRequest>> {
    let Some(user) = store.current_user()? else {
        return Ok(Vec::new());
    };
    Ok(store
        .requests()?
        .into_iter()
        .filter(|r| r.mentor_id == user.id)
        .collect())
}

/// Requests the signed-in user has sent.
pub fn requests_for_current_mentee<S: DataStore>(
    store: &mut S,
) -> Result<Vec<MentorshipRequest>> {
    let Some(user) = store.current_user()? else {
        return Ok(Vec::new());
    };
    Ok(store
        .requests()?
        .into_iter()
        .filter(|r| r.mentee_id == user.id)
        .collect())
}

pub fn create_request<S: DataStore>(
    store: &mut S,
    mentor_id: &str,
    topic: &str,
    message: &str,
) -> Result<Outcome<MentorshipRequest>> {
    let Some(user) = store.current_user()? else {
        return Ok(Outcome::fail("You must be logged in to request mentorship"));
    };

    let request = MentorshipRequest {
        id: new_id("req"),
        mentee_id: user.id.clone(),
        mentee_name: user.name.clone(),
        mentor_id: mentor_id.to_string(),
        topic: topic.to_string(),
        message: message.to_string(),
        status: RequestStatus::Pending,
        scheduled_at: None,
        created_at: Utc::now(),
    };

    let mut requests = store.requests()?;
    requests.push(request.clone());
    store.save_requests(&requests)?;
    tracing::info!(request = %request.id, mentor = mentor_id, "mentorship requested");

    Ok(Outcome::ok_with(request, "Mentorship request sent successfully"))
}

/// Move a request to a new status, optionally setting the session time.
/// A `None` schedule leaves any existing one in place. Requests only move out of
/// `Pending`, never back into it.
pub fn update_request<S: DataStore>(
    store: &mut S,
    request_id: &str,
    status: RequestStatus,
    scheduled_at: Option<DateTime<Utc>>,
) -> Result<Outcome<MentorshipRequest>> {
    if status == RequestStatus::Pending {
        return Ok(Outcome::fail("Invalid status"));
    }
    let mut requests = store.requests()?;
    let Some(index) = position_by_id(&requests, request_id, |r| r.id.as_str()) else {
        return Ok(Outcome::fail("Request not found"));
    };

    let request = &mut requests[index];
    request.status = status;
    if scheduled_at.is_some() {
        request.scheduled_at = scheduled_at;
    }
    let updated = request.clone();
    store.save_requests(&requests)?;
    tracing::info!(request = request_id, status = %status, "mentorship request updated");

    Ok(Outcome::ok_with(updated, format!("Request {} successfully", status)))
}

/// Expertise containment; an empty query returns everyone.
pub fn search<S: DataStore>(store: &mut S, expertise: &str) -> Result<Vec<Mentor>> {
    let mentors = store.mentors()?;
    if expertise.is_empty() {
        return Ok(mentors);
    }
    Ok(mentors
        .into_iter()
        .filter(|m| matches_query(m.expertise.iter().map(String::as_str), expertise))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::MENTOR_ID;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;
    use chrono::TimeZone;

    #[test]
    fn test_get_by_id() {
        let mut store = InMemoryStore::new();
        assert_eq!(get(&mut store, "mentor-2").unwrap().unwrap().name, "Rahul Verma");
        assert!(get(&mut store, "mentor-9").unwrap().is_none());
    }

    #[test]
    fn test_requests_for_mentor() {
        let mut fixture = StoreFixture::new().as_mentor();
        let requests = requests_for_current_mentor(&mut fixture.store).unwrap();
        assert_eq!(requests.len(), 2);
        assert!(requests.iter().all(|r| r.mentor_id == MENTOR_ID));
    }

    #[test]
    fn test_requests_empty_when_signed_out() {
        let mut store = InMemoryStore::new();
        assert!(requests_for_current_mentor(&mut store).unwrap().is_empty());
        assert!(requests_for_current_mentee(&mut store).unwrap().is_empty());
    }

    #[test]
    fn test_create_request_requires_sign_in() {
        let mut store = InMemoryStore::new();
        let outcome = create_request(&mut store, MENTOR_ID, "Rust", "Help!").unwrap();
        assert_eq!(
            outcome.message(),
            Some("You must be logged in to request mentorship")
        );
        assert_eq!(store.requests().unwrap().len(), 3);
    }

    #[test]
    fn test_create_request_appends_pending() {
        let mut fixture = StoreFixture::new().as_learner();
        let outcome = create_request(&mut fixture.store, "mentor-3", "Hooks", "Please").unwrap();
        let request = outcome.data.unwrap();

        assert_eq!(request.status, RequestStatus::Pending);
        assert_eq!(request.mentee_name, "Sahil Kumar");
        let stored = fixture.store.requests().unwrap();
        assert_eq!(stored.len(), 4);
        assert_eq!(stored.last().unwrap().id, request.id);
        assert_eq!(requests_for_current_mentee(&mut fixture.store).unwrap().len(), 3);
    }

    #[test]
    fn test_update_request_status_and_schedule() {
        let mut store = InMemoryStore::new();
        let when = Utc.with_ymd_and_hms(2024, 2, 1, 18, 0, 0).unwrap();

        let outcome = update_request(&mut store, "req-1", RequestStatus::Accepted, Some(when)).unwrap();
        assert_eq!(outcome.message(), Some("Request accepted successfully"));

        let outcome = update_request(&mut store, "req-1", RequestStatus::Completed, None).unwrap();
        let request = outcome.data.unwrap();
        assert_eq!(request.status, RequestStatus::Completed);
        assert_eq!(request.scheduled_at, Some(when));

        let stored = store.requests().unwrap();
        assert_eq!(stored.len(), 3);
        assert_eq!(stored[0].status, RequestStatus::Completed);
    }

    #[test]
    fn test_update_cannot_return_to_pending() {
        let mut store = InMemoryStore::new();
        update_request(&mut store, "req-1", RequestStatus::Accepted, None).unwrap();

        let outcome = update_request(&mut store, "req-1", RequestStatus::Pending, None).unwrap();

        assert_eq!(outcome, Outcome::fail("Invalid status"));
        assert_eq!(store.requests().unwrap()[0].status, RequestStatus::Accepted);
    }

    #[test]
    fn test_update_unknown_request() {
        let mut store = InMemoryStore::new();
        let outcome = update_request(&mut store, "req-404", RequestStatus::Rejected, None).unwrap();
        assert_eq!(outcome, Outcome::fail("Request not found"));
    }

    #[test]
    fn test_search_by_expertise() {
        let mut store = InMemoryStore::new();
        let names: Vec<_> = search(&mut store, "react")
            .unwrap()
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(names, vec!["mentor-1", "mentor-3"]);
        assert_eq!(search(&mut store, "").unwrap().len(), 3);
    }
}
