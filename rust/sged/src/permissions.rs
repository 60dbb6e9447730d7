//! Role → capability grants.
//!
//! The table is a closed `match`: adding a role or capability is a compile-time
//! change. `Direction` holds the wildcard and therefore every capability; the
//! other roles hold explicit tags.
//!
//! The wildcard only widens a *grant*. A requirement listing `*` is satisfied
//! by a wildcard grant and by nothing else, so an entry requiring `[*]` is
//! visible to `Direction` only.

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Direction,
    Secretariat,
    Finance,
    Teacher,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Self::Direction,
        Self::Secretariat,
        Self::Finance,
        Self::Teacher,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "DIRETORIA" => Some(Self::Direction),
            "SECRETARIA" => Some(Self::Secretariat),
            "FINANCEIRO" => Some(Self::Finance),
            "PROFESSOR" => Some(Self::Teacher),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Direction => "DIRETORIA",
            Self::Secretariat => "SECRETARIA",
            Self::Finance => "FINANCEIRO",
            Self::Teacher => "PROFESSOR",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Direction => "Diretoria",
            Self::Secretariat => "Secretaria",
            Self::Finance => "Financeiro",
            Self::Teacher => "Professor",
        }
    }

    pub fn grants(self) -> &'static [Capability] {
        use Capability::*;
        match self {
            Self::Direction => &[All],
            Self::Secretariat => &[
                Students,
                Classes,
                Teachers,
                Subjects,
                Attendance,
                Evaluations,
                Reports,
            ],
            Self::Finance => &[Students, Financial, Reports],
            Self::Teacher => &[Attendance, Evaluations, StudentsRead],
        }
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// `*`
    All,
    Students,
    StudentsRead,
    StudentsWrite,
    Classes,
    ClassesRead,
    ClassesWrite,
    Teachers,
    TeachersRead,
    TeachersWrite,
    Subjects,
    SubjectsRead,
    SubjectsWrite,
    Attendance,
    AttendanceRead,
    AttendanceWrite,
    Evaluations,
    EvaluationsRead,
    EvaluationsWrite,
    Financial,
    FinancialRead,
    FinancialWrite,
    Reports,
    ReportsRead,
    ReportsWrite,
}

impl Capability {
    pub const ALL: [Capability; 25] = [
        Self::All,
        Self::Students,
        Self::StudentsRead,
        Self::StudentsWrite,
        Self::Classes,
        Self::ClassesRead,
        Self::ClassesWrite,
        Self::Teachers,
        Self::TeachersRead,
        Self::TeachersWrite,
        Self::Subjects,
        Self::SubjectsRead,
        Self::SubjectsWrite,
        Self::Attendance,
        Self::AttendanceRead,
        Self::AttendanceWrite,
        Self::Evaluations,
        Self::EvaluationsRead,
        Self::EvaluationsWrite,
        Self::Financial,
        Self::FinancialRead,
        Self::FinancialWrite,
        Self::Reports,
        Self::ReportsRead,
        Self::ReportsWrite,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "*",
            Self::Students => "students",
            Self::StudentsRead => "students.read",
            Self::StudentsWrite => "students.write",
            Self::Classes => "classes",
            Self::ClassesRead => "classes.read",
            Self::ClassesWrite => "classes.write",
            Self::Teachers => "teachers",
            Self::TeachersRead => "teachers.read",
            Self::TeachersWrite => "teachers.write",
            Self::Subjects => "subjects",
            Self::SubjectsRead => "subjects.read",
            Self::SubjectsWrite => "subjects.write",
            Self::Attendance => "attendance",
            Self::AttendanceRead => "attendance.read",
            Self::AttendanceWrite => "attendance.write",
            Self::Evaluations => "evaluations",
            Self::EvaluationsRead => "evaluations.read",
            Self::EvaluationsWrite => "evaluations.write",
            Self::Financial => "financial",
            Self::FinancialRead => "financial.read",
            Self::FinancialWrite => "financial.write",
            Self::Reports => "reports",
            Self::ReportsRead => "reports.read",
            Self::ReportsWrite => "reports.write",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

impl Serialize for Capability {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Grant for an optional role. No role (signed out, or a role string that did
/// not parse) grants nothing.
pub fn grants_for(role: Option<Role>) -> &'static [Capability] {
    role.map(Role::grants).unwrap_or(&[])
}

/// True when the role holds the wildcard, or holds at least one of `required`.
pub fn has_capability(role: Option<Role>, required: &[Capability]) -> bool {
    let granted = grants_for(role);
    if granted.contains(&Capability::All) {
        return true;
    }
    required.iter().any(|c| granted.contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_wildcard_satisfies_everything() {
        for c in Capability::ALL {
            assert!(has_capability(Some(Role::Direction), &[c]));
        }
        assert!(has_capability(
            Some(Role::Direction),
            &[Capability::FinancialWrite, Capability::ReportsRead]
        ));
    }

    #[test]
    fn explicit_grants_match_by_intersection() {
        let sec = Some(Role::Secretariat);
        assert!(has_capability(sec, &[Capability::Students]));
        assert!(has_capability(sec, &[Capability::Financial, Capability::Reports]));
        assert!(!has_capability(sec, &[Capability::Financial]));

        let fin = Some(Role::Finance);
        assert!(has_capability(fin, &[Capability::Financial]));
        assert!(!has_capability(fin, &[Capability::Attendance]));
    }

    #[test]
    fn refinements_are_distinct_tags() {
        let teacher = Some(Role::Teacher);
        assert!(has_capability(teacher, &[Capability::StudentsRead]));
        assert!(!has_capability(teacher, &[Capability::Students]));
        assert!(!has_capability(teacher, &[Capability::StudentsWrite]));
    }

    #[test]
    fn wildcard_requirement_needs_wildcard_grant() {
        for role in [Role::Secretariat, Role::Finance, Role::Teacher] {
            assert!(!has_capability(Some(role), &[Capability::All]));
        }
        assert!(has_capability(Some(Role::Direction), &[Capability::All]));
        assert!(has_capability(
            Some(Role::Teacher),
            &[Capability::Attendance, Capability::All]
        ));
    }

    #[test]
    fn no_role_denies_everything() {
        assert!(grants_for(None).is_empty());
        for c in Capability::ALL {
            assert!(!has_capability(None, &[c]));
        }
        assert_eq!(Role::parse("ADMIN"), None);
        assert!(!has_capability(Role::parse("ADMIN"), &[Capability::Students]));
    }

    #[test]
    fn empty_requirement_only_passes_for_wildcard() {
        assert!(has_capability(Some(Role::Direction), &[]));
        assert!(!has_capability(Some(Role::Secretariat), &[]));
    }

    #[test]
    fn names_round_trip() {
        for role in Role::ALL {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        for c in Capability::ALL {
            assert_eq!(Capability::parse(c.as_str()), Some(c));
        }
        assert_eq!(Capability::parse("students.delete"), None);
    }
}
