// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Évaluation à chaque modification de l’entrée (pas de touche "=")
// - Clavier (champ focus) : Cmd/Ctrl+Backspace efface, Cmd/Ctrl+←/→ vont aux extrémités
// - Boutons d’insertion : unités, unités dérivées, fonctions, constantes
//
// Note :
// - Les raccourcis sont consommés AVANT le TextEdit, sinon il les traite lui-même.
// - `id_salt` (egui 0.33) remplace l’ancien `id_source`.

use eframe::egui;
use egui::text::{CCursor, CCursorRange};
use egui::text_edit::TextEditState;

use super::etat::AppCalc;
use crate::noyau::{calculer, Tables};

const ID_ENTREE: &str = "entree_edit";

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading(crate::TITRE_APP);
                ui.add_space(6.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_resultat(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_boutons(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_demarche(ui);
            });
    }

    /// Soumet l’entrée courante au noyau et dépose le résultat.
    pub fn evaluer_entree(&mut self) {
        let generation = self.soumettre();
        let calcul = calculer(&self.entree, Tables::globales());
        self.recevoir(generation, calcul);
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        ui.label("Entrée (LaTeX) :");

        let id = ui.make_persistent_id(ID_ENTREE);
        let a_le_focus = ui.memory(|m| m.has_focus(id));

        // --- Raccourcis (seulement si le champ est focus) ---
        let mut modifie = false;
        if a_le_focus {
            let (effacer, debut, fin) = ui.input_mut(|i| {
                (
                    i.consume_key(egui::Modifiers::COMMAND, egui::Key::Backspace),
                    i.consume_key(egui::Modifiers::COMMAND, egui::Key::ArrowLeft),
                    i.consume_key(egui::Modifiers::COMMAND, egui::Key::ArrowRight),
                )
            });

            if effacer {
                self.clear_entree();
                modifie = true;
            }
            if debut {
                place_curseur(ui.ctx(), id, 0);
            }
            if fin {
                place_curseur(ui.ctx(), id, self.entree.chars().count());
            }
        }

        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: 3\\operatorname{kg}\\cdot 9.81\\frac{\\operatorname{m}}{\\operatorname{s}^2}")
                .id_salt(ID_ENTREE)
                .code_editor(),
        );

        // Après un bouton : focus + curseur en fin d’entrée
        if self.focus_entree {
            resp.request_focus();
            place_curseur(ui.ctx(), id, self.entree.chars().count());
            self.focus_entree = false;
        }

        if resp.changed() || modifie {
            self.evaluer_entree();
        }

        ui.add_space(6.0);

        ui.horizontal(|ui| {
            if bouton(ui, "C", "Efface l’entrée (Esc)") {
                self.clear_entree();
                self.evaluer_entree();
            }
            if bouton(ui, "DEL", "Efface le dernier symbole") {
                self.backspace_entree();
                self.evaluer_entree();
            }
        });
    }

    fn ui_resultat(&mut self, ui: &mut egui::Ui) {
        ui.label("Résultat :");
        Self::champ_monospace(ui, "resultat_out", &self.affichage, 2);

        if let Some(indicateur) = self.indicateur() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, indicateur);
        }
    }

    fn ui_boutons(&mut self, ui: &mut egui::Ui) {
        let tables = Tables::globales();

        // Opérateurs structurels
        ui.label("Structure :");
        ui.horizontal_wrapped(|ui| {
            for (label, motif) in [
                ("a/b", "\\frac{}{}"),
                ("·", "\\cdot "),
                ("×", "\\times "),
                ("÷", "\\div "),
                ("^", "^{}"),
                ("√", "\\sqrt{}"),
                ("(", "\\left("),
                (")", "\\right)"),
            ] {
                if bouton(ui, label, motif) {
                    self.inserer(motif);
                    self.evaluer_entree();
                }
            }
        });

        ui.add_space(6.0);

        // Surface de configuration : unités de base, dérivées, fonctions
        ui.label("Unités et fonctions :");
        ui.horizontal_wrapped(|ui| {
            for nom in tables.noms_operateurs() {
                let motif = format!("\\operatorname{{{nom}}}");
                if bouton(ui, nom, &motif) {
                    self.inserer(&motif);
                    self.evaluer_entree();
                }
            }
        });

        ui.add_space(6.0);

        ui.label("Constantes :");
        ui.horizontal_wrapped(|ui| {
            for c in &tables.constantes {
                if bouton(ui, c.nom, c.nom) {
                    self.inserer(c.nom);
                    self.evaluer_entree();
                }
            }
        });
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(false)
            .show(ui, |ui| {
                let d = &self.demarche;
                Self::champ_demarche(ui, "Canonique", "demarche_canonique", &d.canonique);
                Self::champ_demarche(ui, "Jetons", "demarche_jetons", &d.jetons);
                Self::champ_demarche(ui, "RPN", "demarche_rpn", &d.rpn);
                Self::champ_demarche(ui, "Arbre", "demarche_arbre", &d.arbre);

                let message = self
                    .erreur
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default();
                Self::champ_demarche(ui, "Erreur", "demarche_erreur", &message);
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        Self::champ_monospace(ui, id, contenu, 1);
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Affichage lecture seule “stable”, sans TextEdit interactif.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }
}

/// Bouton compact ; true si cliqué.
fn bouton(ui: &mut egui::Ui, label: &str, tip: &str) -> bool {
    ui.add_sized([46.0, 28.0], egui::Button::new(label))
        .on_hover_text(tip)
        .clicked()
}

/// Place le curseur du TextEdit `id` à l’index (en caractères) donné.
fn place_curseur(ctx: &egui::Context, id: egui::Id, index: usize) {
    let mut etat = TextEditState::load(ctx, id).unwrap_or_default();
    etat.cursor
        .set_char_range(Some(CCursorRange::one(CCursor::new(index))));
    etat.store(ctx, id);
}
