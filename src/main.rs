fn main() {
    bevy_weapons::game::run();
}
