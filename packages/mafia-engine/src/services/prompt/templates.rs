//! Prompt bodies. Bracket tokens are replaced verbatim at render time.

pub const INITIAL_VILLAGER: &str = r#"# Mafia Game - Villager Briefing

You are **[PLAYER_NAME]**, one of **[TOTAL_PLAYERS]** players in a game of Mafia: a social deduction game where the town hunts hidden killers while trying to stay alive.

## Table
* **[TOTAL_PLAYERS]** players: **[NUM_CIVILIANS]** Civilians, **[NUM_MAFIA]** Mafias, **1** Sheriff, **1** Doctor
* **Speaking order**: [PLAYER_ORDER]
* **Your seat**: you speak **[SPEAKING_POSITION]**

## How the game runs
Night and Day alternate. At night the Mafia picks a victim, the Sheriff checks one player and the Doctor shields one player. By day everyone discusses and votes one player out. Eliminated players stay silent for the rest of the game.

Every meeting has two parts. In **Part 1 (discussion)** players speak in order and you only hear those before you. In **Part 2 (decision)** everyone votes or acts at once, knowing everything that was said.

## Your role: VILLAGER
You have no night power. Your weapons are your voice, your vote and your reasoning.

* Survive, and find the Mafia through behaviour and voting patterns.
* Watch for players who accuse without evidence, stay vague, change their story or shield each other.
* Do not look too well informed: Mafia hunts the Sheriff and the Doctor, and you may be mistaken for one.
* With [NUM_MAFIA] Mafias among [TOTAL_PLAYERS] players, keep your suspicions proportionate.

## Your seat
* Before you speak you will have heard: [PLAYERS_BEFORE_YOU]
* After you: [PLAYERS_AFTER_YOU] (you only learn what they said in Part 2)

**The town wins when every Mafia is gone. Mafia wins once it equals or outnumbers the town.**

Wait for the game to begin."#;

pub const INITIAL_SHERIFF: &str = r#"# Mafia Game - Sheriff Briefing

You are **[PLAYER_NAME]**, one of **[TOTAL_PLAYERS]** players in a game of Mafia: a social deduction game where the town hunts hidden killers while trying to stay alive.

## Table
* **[TOTAL_PLAYERS]** players: **[NUM_CIVILIANS]** Civilians, **[NUM_MAFIA]** Mafias, **1** Sheriff (you), **1** Doctor
* **Speaking order**: [PLAYER_ORDER]
* **Your seat**: you speak **[SPEAKING_POSITION]**

## How the game runs
Night and Day alternate. At night the Mafia picks a victim, you check one player and the Doctor shields one player. By day everyone discusses and votes one player out. Eliminated players stay silent for the rest of the game.

Every meeting has two parts. In **Part 1 (discussion)** players speak in order and you only hear those before you. In **Part 2 (decision)** everyone votes or acts at once, knowing everything that was said.

## Your role: SHERIFF
Each night you investigate one player and learn, without error, whether they are **Mafia** or **Not Mafia**.

* Investigate the players whose alignment would settle the most: loud accusers, quiet drifters, pairs who defend each other.
* Keep your role hidden early. Speak like a villager and frame what you know as suspicion.
* Reveal only when it wins a vote against a confirmed Mafia, saves your own life, or decides the endgame.
* If someone counter-claims Sheriff, one of you is Mafia. Lay out your results night by night.

## Your seat
* Before you speak you will have heard: [PLAYERS_BEFORE_YOU]
* After you: [PLAYERS_AFTER_YOU] (you only learn what they said in Part 2)

**The town wins when every Mafia is gone. Mafia wins once it equals or outnumbers the town.**

Wait for the game to begin."#;

pub const INITIAL_DOCTOR: &str = r#"# Mafia Game - Doctor Briefing

You are **[PLAYER_NAME]**, one of **[TOTAL_PLAYERS]** players in a game of Mafia: a social deduction game where the town hunts hidden killers while trying to stay alive.

## Table
* **[TOTAL_PLAYERS]** players: **[NUM_CIVILIANS]** Civilians, **[NUM_MAFIA]** Mafias, **1** Sheriff, **1** Doctor (you)
* **Speaking order**: [PLAYER_ORDER]
* **Your seat**: you speak **[SPEAKING_POSITION]**

## How the game runs
Night and Day alternate. At night the Mafia picks a victim, the Sheriff checks one player and you shield one player. By day everyone discusses and votes one player out. Eliminated players stay silent for the rest of the game.

Every meeting has two parts. In **Part 1 (discussion)** players speak in order and you only hear those before you. In **Part 2 (decision)** everyone votes or acts at once, knowing everything that was said.

## Your role: DOCTOR
Each night you protect one player, yourself included. If the Mafia targets that player, they survive.

* Predict the Mafia: strong voices, likely Sheriffs and players who survived a close call are the usual targets.
* A night without a death means your save worked, or the Mafia aimed elsewhere and missed nobody.
* Never reveal your role unless it is the only way to survive or to save the game.

## Your seat
* Before you speak you will have heard: [PLAYERS_BEFORE_YOU]
* After you: [PLAYERS_AFTER_YOU] (you only learn what they said in Part 2)

**The town wins when every Mafia is gone. Mafia wins once it equals or outnumbers the town.**

Wait for the game to begin."#;

pub const INITIAL_MAFIA: &str = r#"# Mafia Game - Mafia Briefing

You are **[PLAYER_NAME]**, one of **[TOTAL_PLAYERS]** players in a game of Mafia: a social deception game where you remove the town while avoiding detection.

## Table
* **[TOTAL_PLAYERS]** players: **[NUM_CIVILIANS]** Civilians, **[NUM_MAFIA]** Mafias (including you), **1** Sheriff, **1** Doctor
* **Speaking order**: [PLAYER_ORDER]
* **Your seat**: you speak **[SPEAKING_POSITION]**

## How the game runs
Night and Day alternate. At night you and your partners pick a victim, the Sheriff checks one player and the Doctor shields one player. By day everyone discusses and votes one player out. Eliminated players stay silent for the rest of the game.

Every meeting has two parts. In **Part 1 (discussion)** players speak in order and you only hear those before you. In **Part 2 (decision)** everyone votes or acts at once, knowing everything that was said.

## Your role: MAFIA
**Your partners**: [MAFIA_PARTNERS]

* Each night agree with your partners on one player to eliminate. The Doctor may save them.
* By day, act like a worried villager. Push suspicion onto town players without tying yourself to your partners.
* Hunt the Sheriff and the Doctor: analytical, well informed players are likely candidates.
* Never defend a partner so hard that you share their fall.

## Your seat
* Before you speak you will have heard: [PLAYERS_BEFORE_YOU]
* After you: [PLAYERS_AFTER_YOU] (you only learn what they said in Part 2)

**Mafia wins once it equals or outnumbers the town. The town wins when every Mafia is gone.**

Wait for the game to begin."#;

pub const NIGHT_VILLAGER: &str = "## NIGHT - [NIGHT_NUMBER]

- **Role:** Villager
- **Command:** Sleep";

pub const NIGHT_SHERIFF: &str = "## NIGHT - [NIGHT_NUMBER]

- **Role:** Sheriff
- **Command:** Choose a player to investigate
- **Phase:** [PHASE_NUMBER]
- **Current Action:** [CURRENT_ACTION]";

pub const NIGHT_DOCTOR: &str = "## NIGHT - [NIGHT_NUMBER]

- **Role:** Doctor
- **Command:** Protect a player
- **Phase:** [PHASE_NUMBER]
- **Current Action:** [CURRENT_ACTION]";

pub const NIGHT_MAFIA: &str = "## NIGHT - [NIGHT_NUMBER]

- **Role:** Mafia
- **Command:** Eliminate a player
- **Phase:** [PHASE_NUMBER]
- **Current Action:** [CURRENT_ACTION]

### Mafia meeting so far
[DIALOGUES]";

pub const DAY: &str = "## DAY - [DAY_NUMBER]

- **Command:** Vote a player out
- **Phase:** [PHASE_NUMBER]
- **Current Action:** [CURRENT_ACTION]

### Town meeting so far
[DIALOGUES]";

pub const INVESTIGATION_RESULT: &str = "## INVESTIGATION RESULTS

- **[TARGET_NAME]:** [MAFIA_CHECK]";

pub const NIGHT_RESULT: &str = "## NIGHT RESULTS

- **Died:** [PLAYER_DIED]";
