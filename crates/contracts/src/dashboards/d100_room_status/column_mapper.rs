//! Heuristic assignment of semantic roles to spreadsheet columns.
//!
//! Every role has an ordered pair of matchers applied to normalized column
//! names: an exact pattern first, then a looser "contains" pattern. For each
//! matcher the first column in field-set order wins. Roles are resolved
//! independently, so one column may serve several roles.

use once_cell::sync::Lazy;
use regex::Regex;

use super::dto::{FieldSet, Role, RoleMapping, RoleOverrides};
use crate::shared::text::normalize;

/// Declarative matcher pair for one role.
#[derive(Debug, Clone, Copy)]
pub struct RoleRule {
    pub role: Role,
    pub exact: &'static str,
    pub contains: &'static str,
}

/// Pattern table, in role order. Patterns apply to `normalize`d names.
pub const ROLE_RULES: &[RoleRule] = &[
    RoleRule {
        role: Role::Room,
        exact: r"^(sala|room|ambiente)$",
        contains: r"sala|ambiente|room|espaco|laborat",
    },
    RoleRule {
        role: Role::Status,
        exact: r"^(status|situacao|estado)$",
        contains: r"status|situac|estado|disponib",
    },
    RoleRule {
        role: Role::Location,
        exact: r"^(bloco|local|localizacao)$",
        contains: r"bloco|local|predio|andar|piso|campus|unidade",
    },
    RoleRule {
        role: Role::Shift,
        exact: r"^(turno|periodo)$",
        contains: r"turno|periodo|shift",
    },
    RoleRule {
        role: Role::Course,
        exact: r"^(curso|disciplina|turma)$",
        contains: r"curso|disciplin|materia|turma|evento|course",
    },
    RoleRule {
        role: Role::Schedule,
        exact: r"^(horario|hora)$",
        contains: r"horario|hora|schedule|time",
    },
    RoleRule {
        role: Role::Instructor,
        exact: r"^(docente|professor)$",
        contains: r"docente|prof|instrutor|responsavel|teacher|instructor",
    },
    RoleRule {
        role: Role::Notes,
        exact: r"^(obs|observacao|observacoes)$",
        contains: r"obs|nota|coment|notes|remark",
    },
];

struct CompiledRule {
    role: Role,
    matchers: [Regex; 2],
}

static COMPILED_RULES: Lazy<Vec<CompiledRule>> = Lazy::new(|| {
    ROLE_RULES
        .iter()
        .map(|rule| CompiledRule {
            role: rule.role,
            matchers: [
                Regex::new(rule.exact).expect("invalid exact role pattern"),
                Regex::new(rule.contains).expect("invalid contains role pattern"),
            ],
        })
        .collect()
});

/// Auto-detects the role mapping, then applies the overrides.
///
/// An override is resolved by exact normalized name, then by normalized
/// substring; an override matching nothing leaves the detected column in place.
pub fn build_mapping(fields: &FieldSet, overrides: &RoleOverrides) -> RoleMapping {
    let normalized = normalized_fields(fields);
    let mut mapping = detect_roles(&normalized);

    for (role, wanted) in overrides.iter() {
        match resolve_override(&normalized, wanted) {
            Some(column) => *mapping.slot_mut(role) = Some(column.to_string()),
            None => log::debug!(
                "Ignoring override {}={:?}: no matching column",
                role.key(),
                wanted
            ),
        }
    }

    mapping
}

/// Pattern-table detection only, no overrides.
pub fn detect_mapping(fields: &FieldSet) -> RoleMapping {
    detect_roles(&normalized_fields(fields))
}

fn normalized_fields(fields: &FieldSet) -> Vec<(String, &str)> {
    fields.iter().map(|field| (normalize(field), field)).collect()
}

fn detect_roles(normalized: &[(String, &str)]) -> RoleMapping {
    let mut mapping = RoleMapping::default();
    for rule in COMPILED_RULES.iter() {
        let found = rule.matchers.iter().find_map(|matcher| {
            normalized
                .iter()
                .find(|(norm, _)| matcher.is_match(norm))
                .map(|(_, field)| *field)
        });
        *mapping.slot_mut(rule.role) = found.map(str::to_string);
    }
    mapping
}

fn resolve_override<'a>(normalized: &[(String, &'a str)], wanted: &str) -> Option<&'a str> {
    let wanted = normalize(wanted);
    if wanted.is_empty() {
        return None;
    }
    normalized
        .iter()
        .find(|(norm, _)| *norm == wanted)
        .or_else(|| normalized.iter().find(|(norm, _)| norm.contains(&wanted)))
        .map(|(_, field)| *field)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(names: &[&str]) -> FieldSet {
        FieldSet::new(names.iter().copied())
    }

    #[test]
    fn test_rule_table_covers_every_role_in_order() {
        let roles: Vec<Role> = ROLE_RULES.iter().map(|r| r.role).collect();
        assert_eq!(roles, Role::ALL.to_vec());
        assert_eq!(COMPILED_RULES.len(), Role::ALL.len());
    }

    #[test]
    fn test_fixed_column_sheet() {
        let mapping = detect_mapping(&fields(&[
            "SALA", "STATUS", "BLOCO", "CURSO", "HORARIO", "DOCENTE", "OBS",
        ]));
        assert_eq!(mapping.room.as_deref(), Some("SALA"));
        assert_eq!(mapping.status.as_deref(), Some("STATUS"));
        assert_eq!(mapping.location.as_deref(), Some("BLOCO"));
        assert_eq!(mapping.shift, None);
        assert_eq!(mapping.course.as_deref(), Some("CURSO"));
        assert_eq!(mapping.schedule.as_deref(), Some("HORARIO"));
        assert_eq!(mapping.instructor.as_deref(), Some("DOCENTE"));
        assert_eq!(mapping.notes.as_deref(), Some("OBS"));
    }

    #[test]
    fn test_accented_headers_via_contains_rules() {
        let mapping = detect_mapping(&fields(&["Ambiente", "Situação", "Andar"]));
        assert_eq!(mapping.room.as_deref(), Some("Ambiente"));
        assert_eq!(mapping.status.as_deref(), Some("Situação"));
        assert_eq!(mapping.location.as_deref(), Some("Andar"));
        assert_eq!(mapping.course, None);
    }

    #[test]
    fn test_exact_match_beats_earlier_contains_match() {
        // "Número da sala" satisfies the contains rule first in field order,
        // but the exact rule is tried before it.
        let mapping = detect_mapping(&fields(&["Número da sala", "Sala"]));
        assert_eq!(mapping.room.as_deref(), Some("Sala"));
    }

    #[test]
    fn test_first_field_wins_ties() {
        let mapping = detect_mapping(&fields(&["Sala de aula", "Sala reserva"]));
        assert_eq!(mapping.room.as_deref(), Some("Sala de aula"));
    }

    #[test]
    fn test_detection_is_deterministic() {
        let set = fields(&["Turno", "Professor responsável", "Comentários", "Bloco"]);
        let first = build_mapping(&set, &RoleOverrides::default());
        for _ in 0..5 {
            assert_eq!(build_mapping(&set, &RoleOverrides::default()), first);
        }
        assert_eq!(first.shift.as_deref(), Some("Turno"));
        assert_eq!(first.instructor.as_deref(), Some("Professor responsável"));
        assert_eq!(first.notes.as_deref(), Some("Comentários"));
    }

    #[test]
    fn test_override_exact_beats_contains() {
        let set = fields(&["Sala antiga", "SALA", "Ambiente"]);
        let overrides = RoleOverrides::default().with(Role::Room, "sala");
        let mapping = build_mapping(&set, &overrides);
        assert_eq!(mapping.room.as_deref(), Some("SALA"));
    }

    #[test]
    fn test_override_falls_back_to_contains() {
        let set = fields(&["Código do espaço", "Identificação da sala"]);
        let overrides = RoleOverrides::default().with(Role::Room, "IDENTIFICACAO");
        let mapping = build_mapping(&set, &overrides);
        assert_eq!(mapping.room.as_deref(), Some("Identificação da sala"));
    }

    #[test]
    fn test_override_without_match_keeps_detected_column() {
        let set = fields(&["SALA", "STATUS"]);
        let overrides = RoleOverrides::default().with(Role::Status, "Estado atual");
        let mapping = build_mapping(&set, &overrides);
        assert_eq!(mapping.status.as_deref(), Some("STATUS"));
    }

    #[test]
    fn test_override_can_fill_undetected_role() {
        let set = fields(&["Identificador", "Situação"]);
        assert_eq!(detect_mapping(&set).room, None);
        let overrides = RoleOverrides::default().with(Role::Room, "identificador");
        assert_eq!(
            build_mapping(&set, &overrides).room.as_deref(),
            Some("Identificador")
        );
    }

    #[test]
    fn test_mapped_columns_belong_to_field_set() {
        let set = fields(&["Ambiente", "Situação", "Andar", "Turno", "Observações"]);
        let overrides = RoleOverrides::default().with(Role::Course, "nope");
        let mapping = build_mapping(&set, &overrides);
        for (_, column) in mapping.iter() {
            assert!(set.contains(column));
        }
    }
}
