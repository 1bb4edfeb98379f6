use super::Result;
use crate::database::model::member::{Member, NewMember};
use crate::database::schema::member::dsl;
use diesel::dsl::exists;
use diesel::prelude::*;
use dto::gender::Gender;
use dto::membership_category::MembershipCategory;

/// Criteria to narrow down a listing of members.
/// `search` is matched, case-insensitively, against names, contact details and identifiers.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MemberFilter {
    pub search: Option<String>,
    pub membership_category: Option<MembershipCategory>,
    pub gender: Option<Gender>,
    pub county: Option<String>,
    pub certificate_generated: Option<bool>,
    pub certificate_sent: Option<bool>,
    pub is_active: Option<bool>,
}

pub(crate) fn insert_member(
    connection: &mut SqliteConnection,
    new_member: &NewMember,
) -> Result<dto::member::Member> {
    let inserted = diesel::insert_into(crate::database::schema::member::table)
        .values(new_member)
        .returning(Member::as_returning())
        .get_result(connection)?;

    dto::member::Member::try_from(inserted)
}

pub fn find_by_membership_number(
    connection: &mut SqliteConnection,
    membership_number: &str,
) -> Result<Option<dto::member::Member>> {
    dsl::member
        .filter(dsl::membership_number.eq(membership_number))
        .select(Member::as_select())
        .first(connection)
        .optional()?
        .map(dto::member::Member::try_from)
        .transpose()
}

pub fn membership_number_exists(
    connection: &mut SqliteConnection,
    membership_number: &str,
) -> Result<bool> {
    let result: bool = diesel::select(exists(
        dsl::member.filter(dsl::membership_number.eq(membership_number)),
    ))
    .get_result(connection)?;

    Ok(result)
}

pub fn id_passport_exists(connection: &mut SqliteConnection, id_passport: &str) -> Result<bool> {
    let result: bool = diesel::select(exists(dsl::member.filter(dsl::id_passport.eq(id_passport))))
        .get_result(connection)?;

    Ok(result)
}

pub fn email_exists(connection: &mut SqliteConnection, email: &str) -> Result<bool> {
    let result: bool = diesel::select(exists(dsl::member.filter(dsl::email.eq(email))))
        .get_result(connection)?;

    Ok(result)
}

/// Record where the certificate of a member has been stored.
/// Return the updated member, if any.
pub fn set_certificate_file(
    connection: &mut SqliteConnection,
    membership_number: &str,
    certificate_file: &str,
) -> Result<Option<dto::member::Member>> {
    diesel::update(dsl::member.filter(dsl::membership_number.eq(membership_number)))
        .set((
            dsl::certificate_file.eq(Some(certificate_file)),
            dsl::certificate_generated.eq(true),
        ))
        .returning(Member::as_returning())
        .get_result(connection)
        .optional()?
        .map(dto::member::Member::try_from)
        .transpose()
}

pub fn mark_certificate_sent(
    connection: &mut SqliteConnection,
    membership_number: &str,
) -> Result<Option<dto::member::Member>> {
    diesel::update(dsl::member.filter(dsl::membership_number.eq(membership_number)))
        .set(dsl::certificate_sent.eq(true))
        .returning(Member::as_returning())
        .get_result(connection)
        .optional()?
        .map(dto::member::Member::try_from)
        .transpose()
}

/// Members are never deleted, only deactivated.
pub fn set_active(
    connection: &mut SqliteConnection,
    membership_number: &str,
    active: bool,
) -> Result<Option<dto::member::Member>> {
    diesel::update(dsl::member.filter(dsl::membership_number.eq(membership_number)))
        .set(dsl::is_active.eq(active))
        .returning(Member::as_returning())
        .get_result(connection)
        .optional()?
        .map(dto::member::Member::try_from)
        .transpose()
}

/// List members matching every criterion of `filter`, most recent registrations first.
pub fn search_members(
    connection: &mut SqliteConnection,
    filter: &MemberFilter,
) -> Result<Vec<dto::member::Member>> {
    let mut query = dsl::member.select(Member::as_select()).into_boxed();

    if let Some(search) = filter.search.as_deref().filter(|search| !search.is_empty()) {
        // SQLite's LIKE is case-insensitive for ASCII characters.
        let pattern = format!("%{}%", escape_like(search));
        query = query.filter(
            dsl::surname
                .like(pattern.clone())
                .escape('\\')
                .or(dsl::other_names.like(pattern.clone()).escape('\\'))
                .or(dsl::email.like(pattern.clone()).escape('\\'))
                .or(dsl::phone.like(pattern.clone()).escape('\\'))
                .or(dsl::membership_number.like(pattern.clone()).escape('\\'))
                .or(dsl::id_passport.like(pattern).escape('\\')),
        );
    }
    if let Some(category) = filter.membership_category {
        query = query.filter(dsl::membership_category.eq(category.as_str()));
    }
    if let Some(gender) = filter.gender {
        query = query.filter(dsl::gender.eq(gender.as_str()));
    }
    if let Some(county) = filter.county.clone() {
        query = query.filter(dsl::county.eq(county));
    }
    if let Some(certificate_generated) = filter.certificate_generated {
        query = query.filter(dsl::certificate_generated.eq(certificate_generated));
    }
    if let Some(certificate_sent) = filter.certificate_sent {
        query = query.filter(dsl::certificate_sent.eq(certificate_sent));
    }
    if let Some(is_active) = filter.is_active {
        query = query.filter(dsl::is_active.eq(is_active));
    }

    let results = query
        .order((dsl::registration_date.desc(), dsl::id.desc()))
        .load(connection)?;

    results
        .into_iter()
        .map(dto::member::Member::try_from)
        .collect()
}

/// `%` and `_` in a search are literal characters, not wildcards.
fn escape_like(search: &str) -> String {
    let mut escaped = String::with_capacity(search.len());
    for character in search.chars() {
        if matches!(character, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(character);
    }
    escaped
}
